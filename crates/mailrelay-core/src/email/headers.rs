/// Header-level rewriting of raw messages for re-sending through SES
///
/// Only the header block (everything up to the first empty line) is touched;
/// body bytes pass through unchanged, whatever their encoding.
use mail_parser::{Addr, Address, MessageParser};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static REPLY_TO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mi)^reply-to:").unwrap());

// From header including folded continuation lines and the line ending
static FROM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^from:[\t ]?([^\r\n]*(?:\r?\n[ \t]+[^\r\n]*)*\r?\n)").unwrap()
});

// From header value, line ending excluded
static FROM_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^from:[\t ]?([^\r\n]*(?:\r?\n[ \t]+[^\r\n]*)*)").unwrap()
});

static ANGLE_ADDR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(.*)>").unwrap());

// Headers SES rejects or that would misattribute the resent message
static STRIPPED_HEADERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^(?:return-path|sender|message-id|dkim-signature):[\t ]?[^\r\n]*\r?\n(?:[ \t]+[^\r\n]*\r?\n)*",
    )
    .unwrap()
});

/// Splits a raw message into its header block and the rest
///
/// The header keeps the line ending of its last line; the body starts with
/// the empty separator line. A message without an empty line is all header.
pub fn split_message(raw: &[u8]) -> (&[u8], &[u8]) {
    let mut line_start = 0;
    for (pos, byte) in raw.iter().enumerate() {
        if *byte == b'\n' {
            let line = &raw[line_start..pos];
            if line.is_empty() || line == b"\r" {
                return raw.split_at(line_start);
            }
            line_start = pos + 1;
        }
    }
    (raw, &[])
}

/// Rewrites the headers of a received message so SES accepts it for re-sending
///
/// - adds `Reply-To` with the original `From` value unless one exists
/// - replaces the `From` address with `from_email`, keeping the display part
/// - drops `Return-Path`, `Sender`, `Message-ID` and `DKIM-Signature`
pub fn rewrite_message(raw: &[u8], from_email: &str) -> Vec<u8> {
    let (header, body) = split_message(raw);
    let mut header = String::from_utf8_lossy(header).into_owned();

    if !REPLY_TO.is_match(&header) {
        let original_from = FROM_LINE.captures(&header).map(|caps| caps[1].to_string());
        match original_from {
            Some(from) => {
                if !header.is_empty() && !header.ends_with('\n') {
                    header.push_str("\r\n");
                }
                header.push_str("Reply-To: ");
                header.push_str(&from);
            }
            None => tracing::debug!(
                "Reply-To address not added because From address was not properly extracted"
            ),
        }
    }

    let header = FROM_VALUE.replace_all(&header, |caps: &Captures| {
        let display = ANGLE_ADDR.replace(&caps[1], "");
        let display = display.trim();
        if display.is_empty() {
            format!("From: <{}>", from_email)
        } else {
            format!("From: {} <{}>", display, from_email)
        }
    });
    let header = STRIPPED_HEADERS.replace_all(&header, "");

    let mut message = Vec::with_capacity(header.len() + body.len());
    message.extend_from_slice(header.as_bytes());
    message.extend_from_slice(body);
    message
}

/// Collects the addresses in the `To` and `Cc` headers, without duplicates
///
/// Display names are ignored, even when they look like an address.
pub fn header_recipients(raw: &[u8]) -> Vec<String> {
    let Some(message) = MessageParser::default().parse(raw) else {
        tracing::debug!("Recipient headers not extracted because the message could not be parsed");
        return Vec::new();
    };

    let mut recipients: Vec<String> = Vec::new();
    for address in [message.to(), message.cc()]
        .into_iter()
        .flat_map(addresses)
        .filter_map(|addr| addr.address.as_deref())
    {
        if !recipients.iter().any(|known| known == address) {
            recipients.push(address.to_string());
        }
    }
    recipients
}

fn addresses<'a>(address: Option<&'a Address<'a>>) -> Vec<&'a Addr<'a>> {
    match address {
        Some(Address::List(list)) => list.iter().collect(),
        Some(Address::Group(groups)) => groups.iter().flat_map(|g| g.addresses.iter()).collect(),
        None => vec![],
    }
}
