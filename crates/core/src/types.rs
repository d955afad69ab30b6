/// Customer primary keys are PostgreSQL integer ids.
pub type DbId = i64;

/// Currency amounts in platform micro-units (1/1,000,000 of a major unit).
pub type Micros = i64;
