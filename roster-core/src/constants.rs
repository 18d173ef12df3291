//! Fixed values shared by hydration, dehydration and the share-string codec.
//!
//! Team defaults are part of the wire contract: dehydration only emits
//! fields that differ from them, so changing a value here silently changes
//! what old share links decode to.

// Team defaults ------------------------------------------------------------
pub const DEFAULT_TEAM_NAME: &str = "New Team";
pub const DEFAULT_MAX_COST: u32 = 50;

// Vehicle instantiation ----------------------------------------------------
pub const CREW_CAPACITY_MULTIPLIER: u32 = 2;
pub const UID_LENGTH: usize = 9;
pub const UID_RADIX: u32 = 36;

// Weapon slug suffix grammar -----------------------------------------------
pub const SUFFIX_DELIMITER: char = '!';
pub const COLOUR_PREFIX: char = '#';

// Share string grammar -----------------------------------------------------
pub const TEAM_FIELD_DELIMITER: char = '&';
pub const TEAM_VALUE_DELIMITER: char = '=';
pub const VEHICLE_FIELD_DELIMITER: char = ',';
pub const VEHICLE_VALUE_DELIMITER: char = ':';
pub const ARRAY_DELIMITER: char = '-';
pub const VEHICLE_SHORT_KEY: &str = "v";

// Cost rules ---------------------------------------------------------------
pub const TURRET_COST_MULTIPLIER: u32 = 3;
pub const NITRO_DISCOUNT_SPONSOR: &str = "idris";
pub const NITRO_UPGRADE_SLUG: &str = "nitro";
pub const CREW_DISCOUNT_SPONSOR: &str = "scarlett";
pub const CREW_UPGRADE_SLUG: &str = "crew";
