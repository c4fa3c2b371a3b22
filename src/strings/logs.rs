pub fn config_loaded(user: &str) -> String {
    format!("Loaded configuration for user: {user}")
}

pub const LOGIN_SUCCESS: &str = "Logged in successfully!";

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub const INITIAL_SYNC: &str = "Running initial sync...";
pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub const SHUTDOWN: &str = "Shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("💌 Received invite for room {room_id:?}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub const JOIN_INVITE_SUCCESS: &str = "✅ Successfully joined room!";
pub const CONFIG_READ_ERROR: &str = "Failed to read config.yaml";
pub const CONFIG_PARSE_ERROR: &str = "Failed to parse config.yaml";

pub fn engine_started(feeds: usize) -> String {
    format!("Engine started with {feeds} feed subscription(s)")
}

pub const ENGINE_STOPPED: &str = "Engine stopped";
pub const DISPATCH_QUEUE_CLOSED: &str = "Dispatch queue closed, subscription stopping";
