// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string for debug output.
///
/// - Empty input is printed as `EMPTY`.
/// - Input shorter than 12 characters is entirely redacted.
/// - Otherwise only the first four characters are kept, which is enough to
///   tell access keys apart without leaking them.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.chars().count();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            let prefix: String = self.0.chars().take(4).collect();
            f.write_str(&prefix)?;
            f.write_str("***")
        }
    }
}

/// Append an already encoded query string to `url`.
///
/// Existing query parameters are kept: the new query is joined with `&` if
/// `url` already carries a query, and with `?` otherwise. A fragment stays at
/// the end of the returned url.
///
/// ```
/// use arksign_core::utils::append_query;
///
/// assert_eq!(append_query("http://a.com/x", "k=v"), "http://a.com/x?k=v");
/// assert_eq!(append_query("http://a.com/x?a=1", "k=v"), "http://a.com/x?a=1&k=v");
/// assert_eq!(append_query("http://a.com/x#top", "k=v"), "http://a.com/x?k=v#top");
/// ```
pub fn append_query(url: &str, query: &str) -> String {
    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };

    let mut s = String::with_capacity(url.len() + query.len() + 1);
    s.push_str(base);
    if !query.is_empty() {
        match base.find('?') {
            None => s.push('?'),
            // `http://a.com/x?` and `http://a.com/x?a=1&` need no separator.
            Some(idx) if idx + 1 == base.len() || base.ends_with('&') => {}
            Some(_) => s.push('&'),
        }
        s.push_str(query);
    }
    s.push_str(fragment);

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("", "EMPTY"; "empty")]
    #[test_case("Short", "***"; "short")]
    #[test_case("HelloWorld!", "***"; "eleven chars")]
    #[test_case("2Aj6Wkge4hi1ZYLp0DBG", "2Aj6***"; "access key")]
    #[test_case("ééééééééééééé", "éééé***"; "multi byte")]
    fn test_redact(input: &str, expected: &str) {
        assert_eq!(format!("{:?}", Redact::from(input)), expected);
    }

    #[test]
    fn test_redact_option() {
        assert_eq!(format!("{:?}", Redact::from(&None)), "EMPTY");
        assert_eq!(
            format!("{:?}", Redact::from(&Some("31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7".to_string()))),
            "31sX***"
        );
    }

    #[test_case("http://a.com/x", "k=v", "http://a.com/x?k=v"; "no query")]
    #[test_case("http://a.com/x?a=1", "k=v", "http://a.com/x?a=1&k=v"; "existing query")]
    #[test_case("http://a.com/x?", "k=v", "http://a.com/x?k=v"; "dangling question mark")]
    #[test_case("http://a.com/x?a=1&", "k=v", "http://a.com/x?a=1&k=v"; "dangling ampersand")]
    #[test_case("http://a.com/x?a=1#frag", "k=v", "http://a.com/x?a=1&k=v#frag"; "fragment")]
    #[test_case("http://a.com/x", "", "http://a.com/x"; "empty query")]
    fn test_append_query(url: &str, query: &str, expected: &str) {
        assert_eq!(append_query(url, query), expected);
    }
}
