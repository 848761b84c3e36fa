/// Reports shown per list page when the configuration does not override it
pub const DEFAULT_PAGINATION: i64 = 6;

/// Marker color used for reports without an evaluation level
pub const DEFAULT_MARKER_COLOR: &str = "gray";

/// Where anonymous callers are sent when an action requires a login
pub const DEFAULT_LOGIN_URL: &str = "/accounts/login/";

/// Cookie carrying the session token issued by the identity provider
pub const SESSION_COOKIE: &str = "djeography_session";

/// Cookie carrying a one-shot confirmation notice
pub const NOTICE_COOKIE: &str = "djeography_notice";

/// Default page size for admin API pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed on the admin API
pub const MAX_PAGE_SIZE: i64 = 100;
