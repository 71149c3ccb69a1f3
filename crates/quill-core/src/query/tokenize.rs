//! Query tokenizer
//!
//! Whitespace separates tokens. A double quote at the start of a token opens
//! a phrase that runs to the next lone quote (`""` inside a phrase is a
//! literal quote; an unclosed phrase runs to the end of input). Parentheses
//! are always their own tokens outside phrases. `AND`, `OR` and `NOT` are
//! operators only when written in upper case as whole tokens.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Word(String),
    Phrase(String),
    And,
    Or,
    Not,
    Open,
    Close,
    /// `name:` prefix recognized by the caller's field predicate
    Field(String),
}

pub(crate) fn tokenize(input: &str, is_field: impl Fn(&str) -> bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => flush(&mut buffer, &mut tokens),
            '"' if buffer.is_empty() => {
                let mut phrase = String::new();
                while let Some(c) = chars.next() {
                    if c == '"' {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            phrase.push('"');
                            continue;
                        }
                        break;
                    }
                    phrase.push(c);
                }
                tokens.push(Token::Phrase(phrase));
            }
            '(' => {
                flush(&mut buffer, &mut tokens);
                tokens.push(Token::Open);
            }
            ')' => {
                flush(&mut buffer, &mut tokens);
                tokens.push(Token::Close);
            }
            ':' if is_field(&buffer.to_lowercase()) => {
                tokens.push(Token::Field(buffer.to_lowercase()));
                buffer.clear();
            }
            c => buffer.push(c),
        }
    }
    flush(&mut buffer, &mut tokens);

    tokens
}

fn flush(buffer: &mut String, tokens: &mut Vec<Token>) {
    if buffer.is_empty() {
        return;
    }
    let token = match buffer.as_str() {
        "AND" => Token::And,
        "OR" => Token::Or,
        "NOT" => Token::Not,
        _ => Token::Word(buffer.clone()),
    };
    tokens.push(token);
    buffer.clear();
}
