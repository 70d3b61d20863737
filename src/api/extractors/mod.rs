mod request_attributes;

pub use request_attributes::RequestAttributes;
