use dirserve::http::parser::{MAX_HEAD_SIZE, ParseError, parse_http_request};

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_stops_at_blank_line() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, "POST");
    assert_eq!(consumed, req.len() - 5);
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("user-agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("accept").unwrap(), "*/*");
}

#[test]
fn test_parse_header_names_are_lowercased() {
    let req = b"GET / HTTP/1.1\r\nContent-Type: application/json\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert!(parsed.headers.contains_key("content-type"));
    assert!(!parsed.headers.contains_key("Content-Type"));
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Tag: one\r\nx-tag: two\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.headers.get("x-tag").unwrap(), "two");
}

#[test]
fn test_parse_header_value_leading_space_stripped() {
    let req = b"GET / HTTP/1.1\r\nHost:    example.com\r\nX-Empty:\r\nX-Colon: a:b\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("x-empty").unwrap(), "");
    assert_eq!(parsed.headers.get("x-colon").unwrap(), "a:b");
}

#[test]
fn test_parse_bare_newlines() {
    let req = b"GET /a HTTP/1.1\nHost: x\n\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/a");
    assert_eq!(parsed.headers.get("host").unwrap(), "x");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    assert_eq!(parse_http_request(req), Err(ParseError::Incomplete));
}

#[test]
fn test_parse_empty_buffer_is_incomplete() {
    assert_eq!(parse_http_request(b""), Err(ParseError::Incomplete));
}

#[test]
fn test_parse_unknown_method_is_not_a_parse_error() {
    let req = b"BREW /pot HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, "BREW");
}

#[test]
fn test_parse_request_line_wrong_token_count() {
    for line in ["GET /\r\n\r\n", "GET / HTTP/1.1 extra\r\n\r\n", "\r\n\r\n"] {
        let result = parse_http_request(line.as_bytes());
        assert_eq!(result, Err(ParseError::InvalidRequestLine), "{line:?}");
    }
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    assert_eq!(parse_http_request(req), Err(ParseError::InvalidHeader));
}

#[test]
fn test_parse_invalid_utf8() {
    let req = b"GET /\xff HTTP/1.1\r\n\r\n";
    assert_eq!(parse_http_request(req), Err(ParseError::InvalidEncoding));
}

#[test]
fn test_parse_oversized_head() {
    let mut req = b"GET / HTTP/1.1\r\n".to_vec();
    while req.len() <= MAX_HEAD_SIZE {
        req.extend_from_slice(b"X-Filler: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n");
    }

    assert_eq!(parse_http_request(&req), Err(ParseError::HeadTooLarge));
}

#[test]
fn test_parse_oversized_single_line() {
    let req = vec![b'a'; MAX_HEAD_SIZE + 1];
    assert_eq!(parse_http_request(&req), Err(ParseError::HeadTooLarge));
}
