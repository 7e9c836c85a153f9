/// Length of the synchronization segment, always 1 TQ.
pub const SYNC_SEG: u32 = 1;

/// Default capability profile file.
pub const PROFILES_CFG_FILENAME: &str = "capability.cfg.yaml";
/// dotenv file read before locating the profile file.
pub const TIMING_ENV: &str = "can-timing.env";
/// Directory holding [`PROFILES_CFG_FILENAME`].
pub const TIMING_VAR: &str = "CAN_TIMING_PROFILES";

pub const SJA1000_MAX_BRP: u32 = 64;   // BaudRate Pre-scale
pub const SJA1000_MAX_TSEG1: u32 = 16; // Time Segment 1
pub const SJA1000_MAX_TSEG2: u32 = 8;  // Time Segment 2
pub const SJA1000_MAX_SJW: u32 = 4;    // Synchronization Jump Width
