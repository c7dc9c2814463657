/// Proxy route answering registration lookups.
pub const VEHICLE_ROUTE: &str = "/api/vehicle";

/// Query parameter carrying the vehicle registration mark.
pub const REGISTRATION_PARAM: &str = "vrm";

pub const DEFAULT_PROXY_PORT: u16 = 3000;

/// Where the configurator expects the proxy when nothing overrides it.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

pub const DEFAULT_UPSTREAM_ENDPOINT: &str = "https://uk.api.vehicledataglobal.com/r2/lookup";
pub const DEFAULT_PACKAGE_NAME: &str = "VehicleDetailsWithImage";

/// Error bodies returned by the proxy.
pub const MISSING_REGISTRATION_ERROR: &str = "Missing registration (vrm)";
pub const UPSTREAM_FAILURE_ERROR: &str = "Failed to fetch vehicle data";
