//! Prompt templates.

/// Ask for element addresses. `page` is the dictionary and token stream
/// from [`Compaction::page_structure`](crate::Compaction::page_structure).
pub fn element_query(page: &str, query: &str) -> String {
    format!(
        r#"You are given a web page in a compressed form. The first section maps
tokens to tag shapes. The second section is the page markup where every
opening tag is written as `tN(address)` and every closing tag as `tN`.
Text content is unchanged.

{page}

Find the elements described by the query below. The query is either a
natural language description or a GraphQL-like structure such as
`{{ login_button search_results[] {{ title link }} }}`.

Answer with JSON only, inside a ```json fenced block:
- mirror the structure of the query; use arrays for `[]` fields
- every leaf value is the address string of the matching element
- use an empty string for an element you cannot find
- for a natural language query, pick descriptive snake_case keys

Query:
{query}
"#
    )
}

/// Ask for extracted values from page text.
pub fn data_query(content: &str, query: &str) -> String {
    format!(
        r#"Below is the text content of a web page in Markdown.

{content}

Extract the data described by the query below. The query is either a
natural language description or a GraphQL-like structure such as
`{{ products[] {{ name price }} }}`.

Answer with JSON only, inside a ```json fenced block:
- mirror the structure of the query; use arrays for `[]` fields
- leaf values are the extracted values, as numbers or booleans where natural
- use null for data that is not on the page
- for a natural language query, pick descriptive snake_case keys

Query:
{query}
"#
    )
}
