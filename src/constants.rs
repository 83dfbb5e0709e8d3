/// Prefix for every log line emitted by the service.
pub const API_NAME: &str = "[basic-rest]";

pub const API_PREFIX: &str = "/api/v1";
