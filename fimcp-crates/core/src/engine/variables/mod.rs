//! A variable, in the context of the store, is a view onto a 0-1 domain. It may forward domain
//! information unaltered ([`DomainId`]), or complement it ([`Literal`] with negative polarity).

mod boolean_variable;
mod domain_id;
mod literal;

pub use boolean_variable::BooleanVariable;
pub use domain_id::DomainId;
pub use literal::Literal;
