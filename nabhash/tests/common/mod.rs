#![allow(dead_code)]

use nabhash::Backend;

pub fn take_comment(raw: &[u8]) -> usize {
    if !matches!(raw.first(), Some(b'#')) { return 0 }

    let mut pos: usize = 1;

    loop {
        match raw.get(pos) {
            Some(b'\n') | None => break,
            Some(_) => pos += 1,
        }
    }

    pos
}

pub fn take_ignorable(raw: &[u8]) -> &[u8] {
    let mut pos: usize = 0;

    loop {
        match raw.get(pos) {
            Some(b'#') => pos += take_comment(&raw[pos..]),
            Some(b' ' | b'\r' | b'\n') => pos += 1,
            _ => return &raw[pos..]
        }
    }
}

#[inline]
pub fn take_until_break(raw: &[u8]) -> (&[u8], &[u8]) {
    let pos = raw.iter().position(|b| matches!(b, b'\n' | b'\r')).unwrap_or(raw.len());
    (&raw[..pos], raw.get(pos + 1..).unwrap_or(&[]))
}

/// Parse `<ident> = <value>`, returning the value and the remainder.
pub fn parse_assign<'r>(ident: &[u8], raw: &'r [u8]) -> Option<(&'r [u8], &'r [u8])> {
    let rem = raw.strip_prefix(ident)?;
    let rem = take_spaces(rem).strip_prefix(b"=")?;
    let (value, rem) = take_until_break(take_spaces(rem));
    Some((trim_end(value), rem))
}

fn take_spaces(raw: &[u8]) -> &[u8] {
    let pos = raw.iter().position(|b| *b != b' ').unwrap_or(raw.len());
    &raw[pos..]
}

fn trim_end(raw: &[u8]) -> &[u8] {
    let pos = raw.iter().rposition(|b| *b != b' ').map_or(0, |p| p + 1);
    &raw[..pos]
}

/// A single known answer.
#[derive(Debug, Clone)]
pub struct Known {
    pub msg: Vec<u8>,
    pub md: [u8; nabhash::SIZE]
}

/// `Len`, `Msg`, `MD` records, `Len` in bytes. The message of an empty record is written as
/// `00` and must be ignored.
pub struct KnownTest<'t> {
    inner: &'t [u8]
}

impl<'t> KnownTest<'t> {
    pub const fn new(raw: &'t [u8]) -> Self {
        Self { inner: raw }
    }
}

impl<'t> Iterator for KnownTest<'t> {
    type Item = Known;

    fn next(&mut self) -> Option<Self::Item> {
        let rem = take_ignorable(self.inner);
        if rem.is_empty() { return None }

        let (len, rem) = parse_assign(b"Len", rem)
            .expect("[PARSE] Expected a `Len` field.");
        let len: usize = core::str::from_utf8(len).ok()
            .and_then(|len| len.parse().ok())
            .expect("[PARSE] `Len` was not a valid number.");

        let (msg, rem) = parse_assign(b"Msg", take_ignorable(rem))
            .expect("[PARSE] Expected a `Msg` field.");
        let (md, rem) = parse_assign(b"MD", take_ignorable(rem))
            .expect("[PARSE] Missing the expected output (`MD` field)");

        self.inner = rem;

        let msg = if len == 0 {
            Vec::new()
        } else {
            let msg = hex::decode(msg)
                .expect("[PARSE] Message (`Msg`) was not properly hex encoded.");
            assert_eq!(msg.len(), len, "[PARSE] `Len` does not match the message length.");
            msg
        };

        let mut de_md = [0u8; nabhash::SIZE];
        hex::decode_to_slice(md, de_md.as_mut_slice())
            .expect("[PARSE] Expected output (`MD`) was not properly hex encoded.");

        Some(Known { msg, md: de_md })
    }
}

pub fn load_kats() -> Vec<Known> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/vectors/nabhash.kat");
    let raw = std::fs::read(path).expect("Failed to read the known answer tests");
    KnownTest::new(raw.as_slice()).collect()
}

/// Every backend the host can run, the portable one last.
pub fn backends() -> Vec<Backend> {
    Backend::available().collect()
}
