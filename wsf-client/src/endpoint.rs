//! Endpoint resolution.
//!
//! Turns a service name, a relative path and optional path parameters into
//! the fully qualified, authenticated URL sent upstream.

use url::{ParseError, Url};

use crate::config::ClientConfig;

/// Path parameters appended after the endpoint path.
///
/// Scalars (strings and numbers) become a single segment; sequences are
/// joined with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Params {
    /// No parameters
    #[default]
    None,
    /// A single path segment
    Segment(String),
    /// Several path segments, in order
    Segments(Vec<String>),
}

impl Params {
    /// Render the parameters as a path suffix (`""`, `"/a"` or `"/a/b"`).
    fn suffix(&self) -> String {
        match self {
            Params::None => String::new(),
            Params::Segment(segment) => format!("/{segment}"),
            Params::Segments(segments) => format!("/{}", segments.join("/")),
        }
    }
}

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Params::None
    }
}

impl From<&str> for Params {
    fn from(segment: &str) -> Self {
        Params::Segment(segment.to_string())
    }
}

impl From<String> for Params {
    fn from(segment: String) -> Self {
        Params::Segment(segment)
    }
}

impl From<&String> for Params {
    fn from(segment: &String) -> Self {
        Params::Segment(segment.clone())
    }
}

macro_rules! numeric_params {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Params {
                fn from(value: $ty) -> Self {
                    Params::Segment(value.to_string())
                }
            }
        )*
    };
}

numeric_params!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<T: ToString> From<Vec<T>> for Params {
    fn from(values: Vec<T>) -> Self {
        Params::Segments(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for Params {
    fn from(values: &[T]) -> Self {
        Params::Segments(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for Params {
    fn from(values: [T; N]) -> Self {
        Params::Segments(values.iter().map(ToString::to_string).collect())
    }
}

impl<P: Into<Params>> From<Option<P>> for Params {
    fn from(value: Option<P>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Resolve an endpoint URL.
///
/// An unknown or missing `service` falls back to the generic base URL. An
/// absolute `path` replaces the base entirely. The access code is appended
/// only when the URL carries no query string yet.
///
/// ```
/// use wsf_client::config::ClientConfig;
/// use wsf_client::endpoint::{resolve, Params};
///
/// let config = ClientConfig::new("XXXX");
/// let url = resolve("vessellocations", Some("vessels"), &Params::from(3u32), &config);
/// assert_eq!(
///     url,
///     "http://www.wsdot.wa.gov/ferries/api/vessels/rest/vessellocations/3?apiaccesscode=XXXX"
/// );
/// ```
pub fn resolve(
    path: &str,
    service: Option<&str>,
    params: &Params,
    config: &ClientConfig,
) -> String {
    let mut endpoint = if is_absolute(path) {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", config.service_base(service), path)
    } else {
        format!("{}/{}", config.service_base(service), path)
    };

    endpoint.push_str(&params.suffix());

    if endpoint.ends_with('/') {
        endpoint.pop();
    }

    if !endpoint.contains('?') {
        endpoint.push_str("?apiaccesscode=");
        endpoint.push_str(&config.api_access_code);
    }

    endpoint
}

/// Whether `path` has a URL scheme. A schemed URL with a bad host or port
/// still counts as absolute.
fn is_absolute(path: &str) -> bool {
    !matches!(Url::parse(path), Err(ParseError::RelativeUrlWithoutBase))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    const CODE: &str = "XXXXXX";
    const VESSELS: &str = "http://www.wsdot.wa.gov/ferries/api/vessels/rest";

    fn config() -> ClientConfig {
        ClientConfig::new(CODE)
    }

    #[test]
    fn builds_service_url() {
        let url = resolve("vessellocations", Some("vessels"), &Params::None, &config());
        assert_eq!(url, format!("{VESSELS}/vessellocations?apiaccesscode={CODE}"));
    }

    #[test]
    fn leading_and_trailing_slashes() {
        let config = config();
        let expected = format!("{VESSELS}/vessellocations?apiaccesscode={CODE}");

        assert_eq!(resolve("/vessellocations", Some("vessels"), &Params::None, &config), expected);
        assert_eq!(resolve("vessellocations/", Some("vessels"), &Params::None, &config), expected);
        assert_eq!(resolve("/vessellocations/", Some("vessels"), &Params::None, &config), expected);
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        let url = resolve("vessellocations//", Some("vessels"), &Params::None, &config());
        assert_eq!(url, format!("{VESSELS}/vessellocations/?apiaccesscode={CODE}"));
    }

    #[test]
    fn existing_query_keeps_its_access_code() {
        let url = resolve(
            "vessellocations?apiaccesscode=OTHER",
            Some("vessels"),
            &Params::None,
            &config(),
        );
        assert_eq!(url, format!("{VESSELS}/vessellocations?apiaccesscode=OTHER"));
    }

    #[test]
    fn unknown_service_uses_generic_base() {
        let config = config();
        let expected = format!("{DEFAULT_BASE_URL}/cacheflushdate?apiaccesscode={CODE}");

        assert_eq!(resolve("cacheflushdate", Some("ferries"), &Params::None, &config), expected);
        assert_eq!(resolve("cacheflushdate", None, &Params::None, &config), expected);
    }

    #[test]
    fn absolute_url_bypasses_base() {
        let config = config();
        let endpoint = "http://www.wsdot.wa.gov/ferries/api/vessels/rest/vessellocations";

        assert_eq!(
            resolve(endpoint, Some("fares"), &Params::None, &config),
            format!("{endpoint}?apiaccesscode={CODE}")
        );

        let with_query = "https://example.test/feed?key=1";
        assert_eq!(resolve(with_query, None, &Params::None, &config), with_query);
    }

    #[test]
    fn schemed_but_malformed_url_is_still_absolute() {
        let config = config();

        let bad_port = "http://example.test:99999/feed";
        assert_eq!(
            resolve(bad_port, Some("vessels"), &Params::None, &config),
            format!("{bad_port}?apiaccesscode={CODE}")
        );

        let bad_host = "ftp://exa mple.test/feed?x=1";
        assert_eq!(resolve(bad_host, None, &Params::None, &config), bad_host);
    }

    #[test]
    fn colon_after_query_is_not_a_scheme() {
        let url = resolve("vessellocations?at=10:30", Some("vessels"), &Params::None, &config());
        assert_eq!(url, format!("{VESSELS}/vessellocations?at=10:30"));
    }

    #[test]
    fn params_are_appended_as_segments() {
        let config = config();
        let params = Params::from(["2024-05-01", "1"]);

        assert_eq!(
            resolve("terminalmates", Some("fares"), &params, &config),
            format!(
                "http://www.wsdot.wa.gov/ferries/api/fares/rest/terminalmates/2024-05-01/1?apiaccesscode={CODE}"
            )
        );
        assert_eq!(
            resolve("vesselbasics", Some("vessels"), &Params::from(18u32), &config),
            format!("{VESSELS}/vesselbasics/18?apiaccesscode={CODE}")
        );
        assert_eq!(
            resolve("vesselbasics", Some("vessels"), &Params::from("18"), &config),
            format!("{VESSELS}/vesselbasics/18?apiaccesscode={CODE}")
        );
    }

    #[test]
    fn empty_segment_list_appends_nothing() {
        let params = Params::from(Vec::<String>::new());
        assert_eq!(
            resolve("vesselbasics", Some("vessels"), &params, &config()),
            format!("{VESSELS}/vesselbasics?apiaccesscode={CODE}")
        );
    }

    #[test]
    fn params_conversions() {
        assert_eq!(Params::from(()), Params::None);
        assert_eq!(Params::from(None::<u32>), Params::None);
        assert_eq!(Params::from(Some(7u32)), Params::Segment("7".into()));
        assert_eq!(
            Params::from(vec![1u32, 2]),
            Params::Segments(vec!["1".into(), "2".into()])
        );
        assert_eq!(
            Params::from(&["a", "b"][..]),
            Params::Segments(vec!["a".into(), "b".into()])
        );
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,12}(/[a-z0-9]{1,12}){0,2}"
    }

    fn service_strategy() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop_oneof![
            Just("fares".to_string()),
            Just("schedule".to_string()),
            Just("terminals".to_string()),
            Just("vessels".to_string()),
            "[a-z]{1,10}",
        ])
    }

    fn absolute_url_strategy() -> impl Strategy<Value = (String, bool)> {
        (
            "(http|https|ftp)",
            "[a-z]{1,10}\\.(com|test|org)",
            "(/[a-z0-9]{1,8}){0,3}",
            prop::option::of("[a-z]{1,5}=[a-z0-9]{1,5}"),
        )
            .prop_map(|(scheme, host, path, query)| {
                let has_query = query.is_some();
                let url = match query {
                    Some(query) => format!("{scheme}://{host}{path}?{query}"),
                    None => format!("{scheme}://{host}{path}"),
                };
                (url, has_query)
            })
    }

    proptest! {
        #[test]
        fn absolute_urls_ignore_the_service(
            (url, has_query) in absolute_url_strategy(),
            service in service_strategy(),
        ) {
            let config = config();
            let resolved = resolve(&url, service.as_deref(), &Params::None, &config);

            prop_assert_eq!(&resolved, &resolve(&url, None, &Params::None, &config));
            if has_query {
                prop_assert_eq!(&resolved, &url);
            } else {
                prop_assert_eq!(resolved, format!("{url}?apiaccesscode={CODE}"));
            }
        }

        #[test]
        fn trailing_slash_is_irrelevant(path in path_strategy(), service in service_strategy()) {
            let config = config();
            let service = service.as_deref();

            prop_assert_eq!(
                resolve(&path, service, &Params::None, &config),
                resolve(&format!("{path}/"), service, &Params::None, &config)
            );
        }

        #[test]
        fn leading_slash_is_irrelevant(path in path_strategy(), service in service_strategy()) {
            let config = config();
            let service = service.as_deref();

            prop_assert_eq!(
                resolve(&path, service, &Params::None, &config),
                resolve(&format!("/{path}"), service, &Params::None, &config)
            );
        }

        #[test]
        fn unknown_services_fall_back(path in path_strategy(), service in "[a-z]{1,10}") {
            let config = config();
            prop_assume!(!config.services.contains_key(&service));

            prop_assert_eq!(
                resolve(&path, Some(&service), &Params::None, &config),
                resolve(&path, None, &Params::None, &config)
            );
            let prefix = format!("{DEFAULT_BASE_URL}/");
            let url = resolve(&path, Some(&service), &Params::None, &config);
            prop_assert!(url.starts_with(&prefix), "{} does not start with {}", url, prefix);
        }

        #[test]
        fn segments_precede_access_code(
            path in path_strategy(),
            a in "[a-z0-9]{1,8}",
            b in "[a-z0-9]{1,8}",
        ) {
            let params = Params::from([a.clone(), b.clone()]);
            let url = resolve(&path, Some("schedule"), &params, &config());
            let expected_suffix = format!("/{a}/{b}?apiaccesscode={CODE}");
            prop_assert!(url.ends_with(&expected_suffix));
        }
    }
}
