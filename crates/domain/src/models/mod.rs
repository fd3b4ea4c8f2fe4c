pub mod generation_request;
pub mod market;
pub mod validation;
pub mod website;
