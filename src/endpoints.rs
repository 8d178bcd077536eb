//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/check-pin-status/{name}',
//! use [format_endpoint].

/// The route for registering a name and PIN.
pub const SET_PIN: &str = "/set-pin";
/// The route for verifying a name and PIN combination.
pub const VERIFY_PIN: &str = "/verify-pin";
/// The route for checking whether a PIN record exists for a name.
pub const CHECK_PIN_STATUS: &str = "/check-pin-status/{name}";
/// The route to create and list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to get and replace the budget.
pub const BUDGET: &str = "/budget";
/// The route for the aggregated dashboard summary.
pub const SUMMARY: &str = "/summary";
/// The route for downloading the filtered transactions as CSV.
pub const EXPORT: &str = "/export";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/check-pin-status/{name}', '{name}'
/// is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
