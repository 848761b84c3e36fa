pub mod constants;
pub mod cookies;
pub mod notice;
pub mod provinces;
pub mod responses;
pub mod site;
pub mod templates;
pub mod types;
pub mod urls;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
