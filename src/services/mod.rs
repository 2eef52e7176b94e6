pub mod chart_service;
pub mod match_service;
pub mod plot_service;
pub mod window_service;

#[cfg(test)]
pub(crate) mod test_support;
