pub mod clientbound_response;
pub mod serverbound_request;
