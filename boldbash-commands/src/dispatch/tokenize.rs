use super::DispatchError;

/// One tokenized statement: a lower-cased command name and its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub name: String,
    pub args: Vec<String>,
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
        || matches!(
            ch,
            '_' | '.' | '@' | '#' | '<' | '>' | ':' | '/' | '(' | ')' | '-'
        )
}

/// Break a statement into tokens.
///
/// A token is a run of word characters, or the text between a pair of double
/// quotes (quotes removed, at least one character). Anything else separates
/// tokens and is dropped.
pub fn split_tokens(segment: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = segment.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if is_word_char(ch) {
            let mut end = start + ch.len_utf8();
            while let Some(&(index, next)) = chars.peek() {
                if !is_word_char(next) {
                    break;
                }
                end = index + next.len_utf8();
                chars.next();
            }
            tokens.push(segment[start..end].to_owned());
        } else if ch == '"' {
            let body_start = start + 1;
            let Some(len) = segment[body_start..].find('"') else {
                continue;
            };
            if len == 0 {
                continue;
            }

            let closing = body_start + len;
            tokens.push(segment[body_start..closing].to_owned());
            while chars.next_if(|&(index, _)| index <= closing).is_some() {}
        }
    }

    tokens
}

/// Tokenize a statement and split off its command name.
///
/// The prefix is stripped from the first token when present.
pub fn tokenize(segment: &str, prefix: char) -> Result<Statement, DispatchError> {
    let mut tokens = split_tokens(segment).into_iter();
    let first = tokens.next().ok_or(DispatchError::EmptyCommand)?;

    let name = first.strip_prefix(prefix).unwrap_or(&first).to_lowercase();
    if name.is_empty() {
        return Err(DispatchError::EmptyCommand);
    }

    Ok(Statement {
        name,
        args: tokens.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::{Statement, split_tokens, tokenize};
    use crate::dispatch::DispatchError;

    #[test]
    fn quoted_arguments_keep_spaces() {
        let statement = tokenize(".cmd arg1 \"arg with spaces\" arg3", '.').unwrap();
        assert_eq!(
            statement,
            Statement {
                name: "cmd".to_owned(),
                args: vec![
                    "arg1".to_owned(),
                    "arg with spaces".to_owned(),
                    "arg3".to_owned(),
                ],
            }
        );
    }

    #[test]
    fn name_is_lower_cased() {
        assert_eq!(tokenize(".PING", '.').unwrap().name, "ping");
        assert_eq!(tokenize(" .Quote 2", '.').unwrap().name, "quote");
    }

    #[test]
    fn later_segments_may_omit_the_prefix() {
        let statement = tokenize(" ping ", '.').unwrap();
        assert_eq!(statement.name, "ping");
        assert!(statement.args.is_empty());
    }

    #[test]
    fn mentions_links_and_durations_are_single_tokens() {
        let tokens = split_tokens(".ban <@1234> 7d https://example.com/a-b_(c)");
        assert_eq!(
            tokens,
            vec![".ban", "<@1234>", "7d", "https://example.com/a-b_(c)"]
        );
    }

    #[test]
    fn other_characters_separate_tokens() {
        assert_eq!(split_tokens("a,b;c|d"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_tokens("héllo wörld"), vec!["héllo", "wörld"]);
    }

    #[test]
    fn unbalanced_and_empty_quotes_are_dropped() {
        assert_eq!(split_tokens("say \"hello"), vec!["say", "hello"]);
        assert_eq!(split_tokens("say \"\" there"), vec!["say", "there"]);
        assert_eq!(split_tokens("say\"quoted\"after"), vec!["say", "quoted", "after"]);
    }

    #[test]
    fn empty_statements_are_rejected() {
        assert_eq!(tokenize("   ", '.'), Err(DispatchError::EmptyCommand));
        assert_eq!(tokenize(" ,,, ", '.'), Err(DispatchError::EmptyCommand));
        assert_eq!(tokenize(". ping", '.'), Err(DispatchError::EmptyCommand));
    }
}
