use crate::{Result, StatementError, consume_while};
use std::{collections::BTreeSet, fmt::Write};

/// Shape of the arguments an operation accepts, derived from its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterContract {
    /// No placeholder in the template.
    NoParams,
    /// `$1..$n` placeholders, `n` positional arguments.
    FixedArity(usize),
    /// `$name` placeholders, the names in first-seen order. The position in the list is the
    /// `$n` marker the name was rewritten to, minus one.
    NamedOrder(Vec<String>),
}

impl ParameterContract {
    /// Number of values bound at execution.
    pub fn arity(&self) -> usize {
        match self {
            ParameterContract::NoParams => 0,
            ParameterContract::FixedArity(n) => *n,
            ParameterContract::NamedOrder(names) => names.len(),
        }
    }
    pub fn is_named(&self) -> bool {
        matches!(self, ParameterContract::NamedOrder(..))
    }
}

/// A parsed statement: the text sent to the backend and its parameter contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    sql: String,
    contract: ParameterContract,
}

impl Template {
    pub fn parse(sql: &str) -> Result<Self> {
        let (sql, contract) = parse_parameters(sql)?;
        Ok(Self { sql, contract })
    }
    /// Statement text, named placeholders already rewritten to `$n`.
    pub fn sql(&self) -> &str {
        &self.sql
    }
    pub fn contract(&self) -> &ParameterContract {
        &self.contract
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Placeholder<'s> {
    Numbered(u64),
    Named(&'s str),
}

impl<'s> Placeholder<'s> {
    fn classify(token: &'s str) -> Result<Self> {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            return token
                .parse()
                .map(Placeholder::Numbered)
                .map_err(|_| StatementError::MalformedParameter(format!("${token}")).into());
        }
        let well_formed = token
            .split('_')
            .all(|word| !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase()));
        if !well_formed {
            return Err(StatementError::MalformedParameter(format!("${token}")).into());
        }
        Ok(Placeholder::Named(token))
    }
}

/// Parse the placeholders of `sql`.
///
/// A placeholder is `$` followed by the longest run of `[A-Za-z0-9_]`, which must be either all
/// digits or `[a-z]+(_[a-z]+)*`. A `$` not followed by such a character is plain text. Named
/// placeholders are rewritten to `$n`, `n` being the position of the name in first-seen order.
pub fn parse_parameters(sql: &str) -> Result<(String, ParameterContract)> {
    let mut placeholders = Vec::new();
    let mut input = sql;
    while let Some(pos) = input.find('$') {
        let start = sql.len() - input.len() + pos;
        input = &input[pos + 1..];
        let token = consume_while(&mut input, |c| c.is_ascii_alphanumeric() || *c == '_');
        if token.is_empty() {
            continue;
        }
        let end = start + 1 + token.len();
        placeholders.push((start..end, Placeholder::classify(token)?));
    }

    let numbered = placeholders
        .iter()
        .filter_map(|(_, p)| match p {
            Placeholder::Numbered(n) => Some(*n),
            _ => None,
        })
        .collect::<BTreeSet<_>>();
    if !numbered.is_empty() {
        if placeholders
            .iter()
            .any(|(_, p)| matches!(p, Placeholder::Named(..)))
        {
            return Err(StatementError::MixedParameterStyles.into());
        }
        let count = numbered.len() as u64;
        if numbered.first() != Some(&1) || numbered.last() != Some(&count) {
            return Err(StatementError::NonContiguousPositionalParameters(
                numbered.into_iter().collect(),
            )
            .into());
        }
        return Ok((sql.to_owned(), ParameterContract::FixedArity(count as usize)));
    }
    if placeholders.is_empty() {
        return Ok((sql.to_owned(), ParameterContract::NoParams));
    }

    let mut names: Vec<String> = Vec::new();
    let mut rewritten = String::with_capacity(sql.len());
    let mut copied = 0;
    for (span, placeholder) in &placeholders {
        let Placeholder::Named(name) = placeholder else {
            continue;
        };
        let position = match names.iter().position(|v| v == name) {
            Some(i) => i + 1,
            None => {
                names.push((*name).to_owned());
                names.len()
            }
        };
        rewritten.push_str(&sql[copied..span.start]);
        let _ = write!(rewritten, "${position}");
        copied = span.end;
    }
    rewritten.push_str(&sql[copied..]);
    Ok((rewritten, ParameterContract::NamedOrder(names)))
}
