// API handlers - thin HTTP orchestration layer
// Handlers only deal with HTTP concerns:
// 1. Extract the request parts
// 2. Validate input
// 3. Call domain logic or the registry client
// 4. Forward the registry answer (or its error) unchanged

pub mod certificate;
pub mod contact;
pub mod domain;
pub mod domain_bulk;
pub mod domain_studio;
pub mod pc_domains;
pub mod ssl_contact;
pub mod user;
pub mod user_2fa;
pub mod whois;
