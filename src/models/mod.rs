pub(crate) mod defaults;
mod input;
mod month;
mod role;

pub(crate) use input::NumericInput;
pub(crate) use month::Month;
pub(crate) use role::Role;

#[cfg(test)]
mod tests;
