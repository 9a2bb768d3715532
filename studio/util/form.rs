/// Parsed `application/x-www-form-urlencoded` body.
///
/// Pairs keep their submission order; lookups return the first match, which
/// is the browser behavior for duplicate field names.
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    /// Parses `key=value&key2=value2` with percent-decoding on both sides.
    pub fn parse(body: &str) -> FormData {
        let pairs = body.split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = match pair.split_once('=') {
                    Some((k, v)) => (k, v),
                    None => (pair, ""),
                };
                (url_decode(k), url_decode(v))
            })
            .collect();
        FormData { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Field parsed as `T`, or `None` when absent or malformed.
    pub fn get_parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }
}

/// Decodes a percent-encoded string (`%XX`) and converts `+` to space.
fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = (bytes[i + 1] as char).to_digit(16)
                    .zip((bytes[i + 2] as char).to_digit(16));
                match hex {
                    Some((hi, lo)) => {
                        out.push((((hi << 4) | lo) as u8) as char);
                        i += 3;
                    }
                    None => {
                        out.push('%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b as char);
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pairs_and_escapes() {
        let form = FormData::parse("dataset=circle&note=a+b%21&empty=");
        assert_eq!(form.get("dataset"), Some("circle"));
        assert_eq!(form.get("note"), Some("a b!"));
        assert_eq!(form.get("empty"), Some(""));
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn parses_numeric_fields() {
        let form = FormData::parse("index=2&epochs=50&bad=abc");
        assert_eq!(form.get_parsed::<usize>("index"), Some(2));
        assert_eq!(form.get_parsed::<usize>("epochs"), Some(50));
        assert_eq!(form.get_parsed::<usize>("bad"), None);
    }
}
