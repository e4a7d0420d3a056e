//! Typed bindings for the backend's REST paths.
//!
//! Each function is one backend call through [`ApiClient`](crate::ApiClient);
//! none of them add behavior beyond choosing the path, method and body.

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalogue;
pub mod checkout;

/// `?a=1&b=2` from the pairs whose value is present, or `""`.
pub(crate) fn query_string<'a>(pairs: impl IntoIterator<Item = (&'a str, Option<String>)>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, &value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}
