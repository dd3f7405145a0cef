pub mod api_response;
pub mod json_fields;
pub mod validation;
