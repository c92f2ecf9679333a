use nom::character::complete::{char, digit1};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::IResult;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Posting};

/// Shared on-disk line grammar for `final/index`, `cache/partial_indexes/*`
/// and, via `parse_u32`, the count/url-index/pre-ind formats (§6). Kept in
/// one place because C4, C5, C7 and C8 all read or write the same index
/// line shape.
fn parse_u32(input: &str) -> IResult<&str, u32> {
    let (rest, digits) = digit1(input)?;
    let value: u32 = digits.parse().map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((rest, value))
}

fn parse_posting(input: &str) -> IResult<&str, Posting> {
    let (input, _) = char('(')(input)?;
    let (input, doc_id) = parse_u32(input)?;
    let (input, _) = char(',')(input)?;
    let (input, count) = parse_u32(input)?;
    let (input, _) = char(')')(input)?;
    let (input, _) = char(',')(input)?;
    Ok((
        input,
        Posting {
            doc_id: DocId::new(doc_id),
            count,
        },
    ))
}

fn parse_postings(input: &str) -> IResult<&str, Vec<Posting>> {
    delimited(char('['), many0(parse_posting), char(']'))(input)
}

/// Parses one `term: [(docid,count),...]` line (final/partial index format).
pub fn parse_index_line(line: &str) -> Result<(String, Vec<Posting>)> {
    let (term, rest) = line
        .split_once(": ")
        .ok_or_else(|| Error::new(ErrorKind::Parse, format!("malformed index line: {:?}", line)))?;

    let (_, postings) = parse_postings(rest)
        .map_err(|e| Error::new(ErrorKind::Parse, format!("malformed postings in {:?}: {}", line, e)))?;

    Ok((term.to_string(), postings))
}

/// Writes one `term: [(docid,count),...]` line, no trailing newline. The
/// caller decides newline placement (every line but the last gets one).
pub fn format_index_line(term: &str, postings: &[Posting]) -> String {
    let mut body = String::new();
    for posting in postings {
        body.push_str(&format!("({},{}),", posting.doc_id.value(), posting.count));
    }
    format!("{}: [{}]", term, body)
}

/// Parses one `docid: total_tokens` line (count file format).
pub fn parse_count_line(line: &str) -> Result<(DocId, u32)> {
    let (doc_id_str, total_str) = line
        .split_once(": ")
        .ok_or_else(|| Error::new(ErrorKind::Parse, format!("malformed count line: {:?}", line)))?;
    let doc_id: u32 = doc_id_str
        .parse()
        .map_err(|_| Error::new(ErrorKind::Parse, format!("bad doc-id in count line: {:?}", line)))?;
    let total: u32 = total_str
        .trim_end()
        .parse()
        .map_err(|_| Error::new(ErrorKind::Parse, format!("bad token count in count line: {:?}", line)))?;
    Ok((DocId::new(doc_id), total))
}

pub fn format_count_line(doc_id: DocId, total_tokens: u32) -> String {
    format!("{}: {}", doc_id.value(), total_tokens)
}

/// Parses one `docid: "<url>",` line (url_index format).
pub fn parse_url_line(line: &str) -> Result<(DocId, String)> {
    let (doc_id_str, rest) = line
        .split_once(": \"")
        .ok_or_else(|| Error::new(ErrorKind::Parse, format!("malformed url_index line: {:?}", line)))?;
    let url = rest
        .trim_end()
        .strip_suffix("\",")
        .ok_or_else(|| Error::new(ErrorKind::Parse, format!("malformed url_index line: {:?}", line)))?;
    let doc_id: u32 = doc_id_str
        .parse()
        .map_err(|_| Error::new(ErrorKind::Parse, format!("bad doc-id in url_index line: {:?}", line)))?;
    Ok((DocId::new(doc_id), url.to_string()))
}

pub fn format_url_line(doc_id: DocId, url: &str) -> String {
    format!("{}: \"{}\",", doc_id.value(), url)
}

/// Parses a `cache/pre_ind/<docid>` file: header line `total_tokens`,
/// then `term: count` lines ascending by term.
pub fn parse_pre_ind_file(contents: &str) -> Result<(u32, Vec<(String, u32)>)> {
    let mut lines = contents.lines();
    let header = lines
        .next()
        .ok_or_else(|| Error::new(ErrorKind::Parse, "empty pre_ind file"))?;
    let total_tokens: u32 = header
        .parse()
        .map_err(|_| Error::new(ErrorKind::Parse, format!("bad pre_ind header: {:?}", header)))?;

    let mut counts = Vec::new();
    for line in lines {
        let (term, count_str) = line.split_once(": ").ok_or_else(|| {
            Error::new(ErrorKind::Parse, format!("malformed pre_ind term line: {:?}", line))
        })?;
        let count: u32 = count_str
            .parse()
            .map_err(|_| Error::new(ErrorKind::Parse, format!("bad term count: {:?}", line)))?;
        counts.push((term.to_string(), count));
    }
    Ok((total_tokens, counts))
}

pub fn format_pre_ind_file(total_tokens: u32, counts: &[(String, u32)]) -> String {
    let mut out = format!("{}\n", total_tokens);
    for (term, count) in counts {
        out.push_str(&format!("{}: {}\n", term, count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_index_line() {
        let postings = vec![
            Posting { doc_id: DocId::new(0), count: 3 },
        ];
        let line = format_index_line("cas", &postings);
        assert_eq!(line, "cas: [(0,3),]");
        let (term, parsed) = parse_index_line(&line).unwrap();
        assert_eq!(term, "cas");
        assert_eq!(parsed, postings);
    }

    #[test]
    fn round_trips_url_line() {
        let line = format_url_line(DocId::new(5), "http://example.org/a.html");
        assert_eq!(line, "5: \"http://example.org/a.html\",");
        let (doc_id, url) = parse_url_line(&line).unwrap();
        assert_eq!(doc_id, DocId::new(5));
        assert_eq!(url, "http://example.org/a.html");
    }

    #[test]
    fn round_trips_pre_ind_file() {
        let counts = vec![("cas".to_string(), 3)];
        let contents = format_pre_ind_file(3, &counts);
        assert_eq!(contents, "3\ncas: 3\n");
        let (total, parsed) = parse_pre_ind_file(&contents).unwrap();
        assert_eq!(total, 3);
        assert_eq!(parsed, counts);
    }
}
