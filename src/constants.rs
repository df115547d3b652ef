pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ORIGIN: &str = "Origin";
    pub const X_CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
    /// Caller-supplied JSON object of extra outbound headers.
    pub const X_CORS_HEADERS: &str = "x-cors-headers";
    /// JSON echo of every upstream response header.
    pub const CORS_RECEIVED_HEADERS: &str = "cors-received-headers";
    pub const CF_CONNECTING_IP: &str = "CF-Connecting-IP";
    pub const CF_IPCOUNTRY: &str = "CF-IPCountry";
}

pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const OPTIONS: &str = "OPTIONS";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

pub mod env {
    pub const WHITELIST_ORIGINS: &str = "WHITELIST_ORIGINS";
    pub const BLACKLIST_ORIGINS: &str = "BLACKLIST_ORIGINS";
    pub const WHITELIST_URLS: &str = "WHITELIST_URLS";
    pub const BLACKLIST_URLS: &str = "BLACKLIST_URLS";
    pub const UPSTREAM_TIMEOUT_MS: &str = "UPSTREAM_TIMEOUT_MS";
}

pub mod page {
    pub const BANNER: &str = "CORS-ANYWHERE";
    pub const SOURCE_URL: &str = env!("CARGO_PKG_REPOSITORY");
    pub const DAILY_LIMIT: &str = "100,000 requests/day";
    pub const BURST_LIMIT: &str = "1,000 requests/10 minutes";
}
