/// A cookie announced by a `Set-Cookie` response header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cookie {
    pub name:      String,
    pub value:     String,
    pub path:      Option<String>,
    pub domain:    Option<String>,
    pub expires:   Option<String>,
    pub max_age:   Option<String>,
    pub secure:    bool,
    pub http_only: bool,
    pub same_site: Option<String>,
    /// The header value as received.
    pub raw:       String,
}

/// Parse one `Set-Cookie` value. Returns `None` without a `name=value` pair.
pub fn parse_set_cookie(header: &str) -> Option<Cookie> {
    let mut attrs = header.split(';');
    let (name, value) = attrs.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut cookie = Cookie {
        name: name.to_string(),
        value: value.trim().trim_matches('"').to_string(),
        raw: header.to_string(),
        ..Cookie::default()
    };

    for attr in attrs {
        let attr = attr.trim();
        match attr.split_once('=') {
            Some((k, v)) => {
                let v = v.trim().to_string();
                match k.trim().to_ascii_lowercase().as_str() {
                    "path" => cookie.path = Some(v),
                    "domain" => cookie.domain = Some(v.trim_start_matches('.').to_string()),
                    "expires" => cookie.expires = Some(v),
                    "max-age" => cookie.max_age = Some(v),
                    "samesite" => cookie.same_site = Some(v),
                    _ => {}
                }
            }
            None => {
                if attr.eq_ignore_ascii_case("secure") {
                    cookie.secure = true;
                } else if attr.eq_ignore_ascii_case("httponly") {
                    cookie.http_only = true;
                }
            }
        }
    }

    Some(cookie)
}
