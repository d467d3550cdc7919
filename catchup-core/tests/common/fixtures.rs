//! Delimiter-bearing inputs shared by the boundary and scenario tests.

/// Every fixture is run in every delimiter mode.
pub const FIXTURES: &[&[u8]] = &[
    b"",
    b"no delimiters at all",
    b"a\r\nb\r\nc\r\n",
    b"a\n\rb\n\rc",
    b"a\r\nb\n\rc",
    b"\r\n\r\n",
    b"\n\r\n\r",
    b"\r\r\n\n",
    b"a\rb\nc\r\n\n\rd",
    b"x\r\n\ry\n\r\nz",
    b"line one\r\nline two\rline three\nline four",
    b"trailing cr\r",
    b"trailing lf\n",
    b"caf\xc3\xa9\r\n\xff\xfe\r\nok",
];

/// CRLF-terminated text: six lines, six terminators, a few of them empty.
pub const CRLF_TEXT: &[u8] = b"GET / HTTP/1.1\r\nHost: example\r\n\r\nbody line\r\n\r\nlast\r\n";
