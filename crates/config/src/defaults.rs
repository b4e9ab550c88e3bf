pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_http_port() -> u16 {
    8080
}

pub fn default_storage_profile() -> String {
    "default".to_string()
}

pub fn default_storage_region() -> String {
    "us-east-1".to_string()
}

pub fn default_remote_base_url() -> String {
    "https://www.naver.com".to_string()
}

pub fn default_max_connections() -> u32 {
    20
}

pub fn default_count_table() -> String {
    "test".to_string()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}
