/// Router Module Index
///
/// Organizes the application's routing logic into access-segregated modules.
/// Because the admin surface shares paths with the public one (the same
/// `/api/products` answers anonymous GETs and admin-only POSTs), the three
/// routers are merged rather than nested; the method routers combine per
/// path, and access control lives in the extractors each handler declares.
/// Routes accessible to any client, anonymous or logged-in. Includes the
/// session entry/exit points (login, register, logout).
pub mod public;

/// Routes requiring a validated session of any role.
pub mod authenticated;

/// Routes restricted to principals with the 'admin' role. Every handler here
/// takes the `AdminUser` extractor; the 401 rejection fires before payload
/// parsing or storage access.
pub mod admin;
