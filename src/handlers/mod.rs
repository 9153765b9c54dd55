// handlers/mod.rs - Route handlers, one module per resource family
//
// No authentication tier: the service only listens on loopback for the
// desktop shell's embedded browser.
pub mod attachments; // GET/POST /attachments
pub mod plans; // GET/POST /plans
pub mod system; // GET /, GET /health
pub mod uploads; // GET /uploads/*, GET /session-documents/*
