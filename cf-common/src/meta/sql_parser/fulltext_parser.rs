use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till1, take_until},
    character::complete::multispace0,
    combinator::recognize,
    sequence::{delimited, tuple},
    IResult,
};

use crate::{error::Error, log_debug, meta::fulltext_index::FullTextIndex};

const FULLTEXT_MARKER: &str = "FULLTEXT KEY";

pub struct FullTextParser {}

impl FullTextParser {
    /// Collects the FULLTEXT KEY definitions of a SHOW CREATE TABLE text, left to right.
    ///
    /// The scan is purely textual: a marker inside a comment or a quoted
    /// identifier is matched too, and the column list ends at the first `)`.
    /// A marker that is not followed by "`name` (cols)" ends the scan. The
    /// name may also come unquoted, as printed with sql_quote_show_create=0.
    pub fn parse(create_table: &str) -> Vec<FullTextIndex> {
        let mut indexes = Vec::new();
        // ascii uppercasing keeps byte offsets intact
        let upper = create_table.to_ascii_uppercase();
        let mut offset = 0;

        while offset < create_table.len() {
            let pos = match upper[offset..].find(FULLTEXT_MARKER) {
                Some(pos) => offset + pos,
                None => break,
            };

            match Self::parse_index(&create_table[pos..]) {
                Ok((remaining, index)) => {
                    indexes.push(index);
                    offset = create_table.len() - remaining.len();
                }
                Err(e) => {
                    log_debug!("stop searching fulltext indexes, {}", e);
                    break;
                }
            }
        }
        indexes
    }

    fn parse_index(input: &str) -> Result<(&str, FullTextIndex), Error> {
        match fulltext_key(input) {
            Ok((remaining, (index_name, columns))) => Ok((
                remaining,
                FullTextIndex {
                    index_name: index_name.to_string(),
                    columns: columns.to_string(),
                },
            )),
            Err(_) => {
                let snippet: String = input.chars().take(64).collect();
                Err(Error::ParseError(format!(
                    "malformed fulltext key definition: {}",
                    snippet
                )))
            }
        }
    }
}

/// FULLTEXT KEY `name` (`col1`,`col2`)
fn fulltext_key(i: &str) -> IResult<&str, (&str, &str)> {
    let (remaining_input, (_, _, index_name, _, columns)) = tuple((
        tag_no_case(FULLTEXT_MARKER),
        multispace0,
        index_identifier,
        multispace0,
        recognize(delimited(tag("("), take_until(")"), tag(")"))),
    ))(i)?;
    Ok((remaining_input, (index_name, columns)))
}

fn index_identifier(i: &str) -> IResult<&str, &str> {
    alt((
        delimited(tag("`"), take_until("`"), tag("`")),
        take_till1(|c: char| c.is_whitespace() || c == '(' || c == '`'),
    ))(i)
}
