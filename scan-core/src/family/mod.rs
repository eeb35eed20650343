//! Malware family knowledge base
//!
//! Static descriptions, impact summaries, and attack timelines for the four
//! families the classifier can name. The table is built once at first use
//! and never mutated; a family name with no table entry gets the generic
//! "Unknown malware" treatment in the verdict builder rather than an error.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Family labels the classifier can emit for malware, in training order
pub const MALWARE_FAMILY_NAMES: [&str; 4] = ["ransomware", "trojan", "spyware", "worm"];

/// Label used for clean samples
pub const BENIGN_LABEL: &str = "benign";

/// One step of the simulated attack timeline shown in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationStep {
    pub time: u32,
    pub desc: &'static str,
}

/// Everything the verdict reports about a known family
#[derive(Debug, Clone, Copy)]
pub struct FamilyProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub impact: &'static [&'static str],
    pub simulation: &'static [SimulationStep],
}

const PROFILES: [FamilyProfile; 4] = [
    FamilyProfile {
        name: "ransomware",
        description: "Encrypts files and demands ransom payment.",
        impact: &[
            "Encrypts all documents, photos, and databases",
            "Deletes shadow copies to prevent recovery",
            "Displays ransom note demanding Bitcoin payment",
            "Changes desktop wallpaper to ransom message",
        ],
        simulation: &[
            SimulationStep { time: 0, desc: "Dropping ransomware payload..." },
            SimulationStep { time: 1, desc: "Scanning for documents..." },
            SimulationStep { time: 2, desc: "Encrypting files..." },
            SimulationStep { time: 3, desc: "Deleting shadow copies..." },
            SimulationStep { time: 4, desc: "Displaying ransom note" },
        ],
    },
    FamilyProfile {
        name: "trojan",
        description: "Disguises as legitimate software to steal data.",
        impact: &[
            "Installs keylogger to capture keystrokes",
            "Steals saved passwords from browsers",
            "Sends data to remote command & control server",
            "Downloads additional malware",
        ],
        simulation: &[
            SimulationStep { time: 0, desc: "Installing persistence in registry..." },
            SimulationStep { time: 1, desc: "Keylogger activated" },
            SimulationStep { time: 2, desc: "Harvesting saved passwords..." },
            SimulationStep { time: 3, desc: "Exfiltrating data to C2 server" },
        ],
    },
    FamilyProfile {
        name: "spyware",
        description: "Monitors user activity and collects information.",
        impact: &[
            "Tracks browsing history and search queries",
            "Captures screenshots periodically",
            "Records microphone and webcam",
            "Logs all keystrokes",
        ],
        simulation: &[
            SimulationStep { time: 0, desc: "Hiding in background processes..." },
            SimulationStep { time: 1, desc: "Starting screen capture..." },
            SimulationStep { time: 2, desc: "Recording microphone..." },
            SimulationStep { time: 3, desc: "Sending logs to attacker" },
        ],
    },
    FamilyProfile {
        name: "worm",
        description: "Self-replicates and spreads across networks.",
        impact: &[
            "Copies itself to network shares and USB drives",
            "Consumes network bandwidth",
            "Opens backdoor for other malware",
            "Slows down system performance",
        ],
        simulation: &[
            SimulationStep { time: 0, desc: "Activating worm replication..." },
            SimulationStep { time: 1, desc: "Scanning local network for targets..." },
            SimulationStep { time: 2, desc: "Copying to vulnerable machines..." },
            SimulationStep { time: 3, desc: "Opening backdoor port for remote access" },
        ],
    },
];

static FAMILY_TABLE: Lazy<HashMap<&'static str, FamilyProfile>> = Lazy::new(|| {
    PROFILES
        .iter()
        .map(|profile| (profile.name, *profile))
        .collect()
});

/// Look up a family by the label the classifier produced
pub fn family_profile(name: &str) -> Option<FamilyProfile> {
    FAMILY_TABLE.get(name).copied()
}

// ============================================================================
// TESTS
// ============================================================================
