//! Shared regex fragments for addresses and labels.
//!
//! Fragments are non-capturing so they can be wrapped in named groups:
//!
//! ```text
//! format!(r"^(?P<mac>{}) +(?P<ip>{})$", &*MAC, &*IP)
//! ```

use once_cell::sync::Lazy;

/// Decimal 0-255.
const OCTET_DEC: &str = r"(?:[0-9]|[1-9][0-9]|1[0-9][0-9]|2[0-4][0-9]|25[0-5])";

/// One or two hex digits.
const OCTET_HEX: &str = r"(?:[A-Fa-f0-9]{1,2})";

/// One to four hex digits.
const WORD_HEX: &str = r"(?:[A-Fa-f0-9]{1,4})";

/// MAC address in dotted-word, colon, dash or dotted-octet notation.
pub static MAC: Lazy<String> = Lazy::new(|| {
    let joined = |sep: &str, part: &str, n: usize| vec![part; n].join(sep);
    format!(
        "(?:{}|{}|{}|{})",
        joined(r"\.", WORD_HEX, 3),
        joined(":", OCTET_HEX, 6),
        joined("-", OCTET_HEX, 6),
        joined(r"\.", OCTET_HEX, 6),
    )
});

/// Dotted-quad IPv4 address.
pub static IPV4: Lazy<String> =
    Lazy::new(|| format!("(?:{})", vec![OCTET_DEC; 4].join(r"\.")));

/// Loose IPv6 address, including `::` and an embedded IPv4 tail.
pub static IPV6: Lazy<String> =
    Lazy::new(|| format!("(?:[A-Fa-f0-9:]*:[A-Fa-f0-9:]*(?::{})?)", &*IPV4));

/// IPv4 or IPv6 address.
pub static IP: Lazy<String> = Lazy::new(|| format!("(?:{}|{})", &*IPV4, &*IPV6));

/// MPLS label: a number or a mnemonic such as `IPv4-explicit-null`.
pub const LABEL: &str = r"(?:[0-9]+|[A-Za-z0-9-]+)";
