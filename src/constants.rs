// ABOUTME: System-wide constants for the Withings bridge
// ABOUTME: Endpoint URLs, measurement type codes, scheduling defaults, env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Constants Module
//!
//! Hardcoded Withings protocol constants plus the defaults behind the
//! environment-driven configuration in [`crate::config`].

/// Withings API endpoints and OAuth parameters
pub mod api {
    /// Token exchange endpoint (both refresh and authorization-code grants)
    pub const TOKEN_URL: &str = "https://wbsapi.withings.net/v2/oauth2";

    /// Measurement retrieval endpoint
    pub const MEASURE_URL: &str = "https://wbsapi.withings.net/measure";

    /// Interactive user authorization endpoint
    pub const AUTHORIZE_URL: &str = "https://account.withings.com/oauth2_user/authorize2";

    /// OAuth scope required for body-composition reads
    pub const OAUTH_SCOPE: &str = "user.metrics";

    /// Withings action parameter for token requests
    pub const ACTION_REQUEST_TOKEN: &str = "requesttoken";

    /// Withings action parameter for measurement retrieval
    pub const ACTION_GET_MEASURES: &str = "getmeas";

    /// Provider status code signalling success inside the response envelope
    pub const STATUS_OK: i32 = 0;
}

/// Withings measurement group and measure type codes
pub mod measures {
    /// Weight in kilograms
    pub const WEIGHT: i32 = 1;

    /// Fat ratio as a percentage
    pub const FAT_RATIO: i32 = 6;

    /// Muscle mass in kilograms
    pub const MUSCLE_MASS: i32 = 76;

    /// Hydration in kilograms
    pub const HYDRATION: i32 = 77;

    /// Bone mass in kilograms
    pub const BONE_MASS: i32 = 88;

    /// The fixed filter requested on every fetch
    pub const TYPE_FILTER: &str = "1,6,76,77,88";

    /// Group attribute marking a normal (non-ambiguous, non-corrected) reading
    pub const NORMAL_ATTRIBUTE: i32 = 0;
}

/// Default values for environment-driven configuration
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8080;

    /// Refresh-token file next to the working directory, matching the
    /// deployed layout
    pub const TOKEN_FILE: &str = "./REFRESH_TOKEN";

    /// Token rotation period in seconds (hourly)
    pub const TOKEN_ROTATION_SECS: u64 = 3600;

    /// Measurement sync period in seconds (minutely)
    pub const SYNC_SECS: u64 = 60;

    /// User height in centimeters used for BMI derivation
    pub const USER_HEIGHT_CM: f64 = 175.0;

    /// Earliest measurement date fetched, as a unix timestamp
    /// (2021-09-11, the account's first scale reading)
    pub const SYNC_START_UNIX: i64 = 1_631_318_400;

    /// OAuth redirect URI registered with the Withings application
    pub const REDIRECT_URI: &str = "http://localhost:8080/withings-callback";

    /// State parameter for the interactive authorization redirect
    pub const OAUTH_STATE: &str = "unspoofed";
}

/// Environment variable names read by [`crate::config::ServerConfig`]
pub mod env_names {
    /// Withings application client id (required)
    pub const CLIENT_ID: &str = "WITHINGS_CLIENT_ID";

    /// Withings application client secret (required)
    pub const CLIENT_SECRET: &str = "WITHINGS_CLIENT_SECRET";

    /// HTTP listen port override
    pub const HTTP_PORT: &str = "HTTP_PORT";

    /// Refresh-token file path override
    pub const TOKEN_FILE: &str = "TOKEN_FILE";

    /// Change-notification webhook URL (optional; notifications disabled
    /// when unset)
    pub const WEBHOOK_URL: &str = "CHANGE_WEBHOOK_URL";

    /// User height in centimeters for BMI derivation
    pub const USER_HEIGHT_CM: &str = "USER_HEIGHT_CM";

    /// Earliest measurement date fetched, unix timestamp
    pub const SYNC_START_UNIX: &str = "SYNC_START_UNIX";

    /// Token rotation period override, seconds
    pub const TOKEN_ROTATION_SECS: &str = "TOKEN_ROTATION_SECS";

    /// Sync period override, seconds
    pub const SYNC_SECS: &str = "SYNC_SECS";

    /// OAuth redirect URI override
    pub const REDIRECT_URI: &str = "WITHINGS_REDIRECT_URI";

    /// Token endpoint override (tests point this at a mock server)
    pub const TOKEN_URL: &str = "WITHINGS_TOKEN_URL";

    /// Measurement endpoint override (tests point this at a mock server)
    pub const MEASURE_URL: &str = "WITHINGS_MEASURE_URL";
}
