//! lp_solve LP text format.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use super::{Draft, FormatError, RowSpec, SosSpec, WriteNames, format_exact};
use crate::model::{Model, default_row_name};
use crate::types::{DEFAULT_INFINITY, Relation};

/// Render the model as LP text.
pub fn to_lp_string(model: &Model) -> String {
    let mut out = String::new();
    let infinity = model.get_infinite();
    let names = WriteNames::new(model);
    let column_name = |column: usize| names.column(column);

    let _ = writeln!(out, "/* Objective function */");
    if let Some(name) = names.explicit_row(0) {
        let _ = write!(out, "{name}: ");
    }
    let sense = if model.is_maxim() { "max" } else { "min" };
    let objective: Vec<(usize, f64)> = if declares_columns_in_order(model) {
        model.objective_terms().to_vec()
    } else {
        let mut dense = vec![0.0; model.columns() + 1];
        for &(column, value) in model.objective_terms() {
            dense[column] = value;
        }
        (1..=model.columns()).map(|column| (column, dense[column])).collect()
    };
    let mut expression = render_terms(&objective, &column_name, true);
    if model.objective_constant() != 0.0 {
        let _ = write!(
            expression,
            "{}{}",
            if expression.is_empty() { "" } else { " " },
            signed(model.objective_constant())
        );
    }
    let _ = writeln!(out, "{sense}: {expression};");

    if model.rows() > 0 {
        let _ = writeln!(out, "\n/* Constraints */");
    }
    for (ordinal, row) in model.row_iter() {
        let label = names.row(ordinal);
        let needs_label = names.explicit_row(ordinal).is_some()
            || row.coefficients.len() <= 1
            || row.range.is_some();
        if needs_label {
            let _ = write!(out, "{label}: ");
        }
        let mut lhs = render_terms(&row.coefficients, &column_name, false);
        if lhs.is_empty() {
            lhs.push('0');
        }
        let (operator, rhs) = match row.relation {
            Relation::Free => (">=", -infinity),
            relation => (relation.operator(), row.rhs),
        };
        let _ = writeln!(out, "{lhs} {operator} {};", format_exact(rhs));

        if let Some(delta) = row.range {
            let (operator, bound) = match row.relation {
                Relation::LessEqual => (">=", row.rhs - delta.abs()),
                Relation::GreaterEqual => ("<=", row.rhs + delta.abs()),
                _ if delta >= 0.0 => ("<=", row.rhs + delta),
                _ => (">=", row.rhs + delta),
            };
            let _ = writeln!(out, "{label}: {operator} {};", format_exact(bound));
        }
    }

    let mut declarations = String::new();
    let mut free = Vec::new();
    let mut integers = Vec::new();
    let mut semicont = Vec::new();
    for (ordinal, column) in model.column_iter() {
        let name = column_name(ordinal);
        if column.is_int {
            integers.push(name.clone());
        }
        if column.is_semicont {
            semicont.push(name.clone());
        }
        let lower_free = column.lower <= -infinity;
        let upper_free = column.upper >= infinity;
        if lower_free && upper_free {
            free.push(name);
        } else if column.lower == column.upper {
            let _ = writeln!(declarations, "{name} = {};", format_exact(column.lower));
        } else if column.lower != 0.0 && !upper_free {
            let _ = writeln!(
                declarations,
                "{} <= {name} <= {};",
                format_exact(column.lower),
                format_exact(column.upper)
            );
        } else if column.lower != 0.0 {
            let _ = writeln!(declarations, "{name} >= {};", format_exact(column.lower));
        } else if !upper_free {
            let _ = writeln!(declarations, "{name} <= {};", format_exact(column.upper));
        }
    }
    if !declarations.is_empty() {
        let _ = write!(out, "\n{declarations}");
    }
    for (keyword, names) in [("int", &integers), ("sec", &semicont), ("free", &free)] {
        if !names.is_empty() {
            let _ = writeln!(out, "\n{keyword} {};", names.join(","));
        }
    }

    let types: BTreeSet<i32> = model.sos_groups().iter().map(|g| g.sos_type).collect();
    for sos_type in types {
        let _ = writeln!(out, "\nsos{sos_type}");
        for group in model.sos_groups().iter().filter(|g| g.sos_type == sos_type) {
            let members: Vec<String> = group
                .members
                .iter()
                .filter_map(|&(column, weight)| {
                    let column = usize::try_from(column).ok()?;
                    (1..=model.columns()).contains(&column).then(|| {
                        format!("{}:{}", column_name(column), format_exact(weight))
                    })
                })
                .collect();
            let _ = writeln!(
                out,
                "{}: {} <= {};",
                group.name,
                members.join(","),
                group.priority
            );
        }
    }
    out
}

/// True when listing only nonzero objective terms still makes every
/// column appear, in ordinal order, before the declarations.
fn declares_columns_in_order(model: &Model) -> bool {
    let mut seen = vec![false; model.columns() + 1];
    let mut next = 1;
    let terms = model
        .objective_terms()
        .iter()
        .chain(model.row_iter().flat_map(|(_, row)| row.coefficients.iter()));
    for &(column, _) in terms {
        if !seen[column] {
            if column != next {
                return false;
            }
            seen[column] = true;
            next += 1;
        }
    }
    next == model.columns() + 1
}

fn render_terms(
    terms: &[(usize, f64)],
    column_name: &impl Fn(usize) -> String,
    keep_zeros: bool,
) -> String {
    let mut rendered = Vec::with_capacity(terms.len());
    for &(column, value) in terms {
        let name = column_name(column);
        let text = if value == 1.0 {
            format!("+{name}")
        } else if value == -1.0 {
            format!("-{name}")
        } else if value == 0.0 && keep_zeros {
            format!("+0 {name}")
        } else {
            format!("{} {name}", signed(value))
        };
        rendered.push(text);
    }
    rendered.join(" ")
}

fn signed(value: f64) -> String {
    if value < 0.0 {
        format_exact(value)
    } else {
        format!("+{}", format_exact(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Cmp(Relation),
    Colon,
    Comma,
    Plus,
    Minus,
    Star,
}

fn tokenize(text: &str) -> Result<Vec<(Vec<(Token, usize)>, usize)>, FormatError> {
    let chars: Vec<char> = text.chars().collect();
    let mut statements = Vec::new();
    let mut current: Vec<(Token, usize)> = Vec::new();
    let mut line = 1;
    let mut start_line = 1;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        if c == '\n' {
            line += 1;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c == '/' && next == Some('*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                if chars[i] == '\n' {
                    line += 1;
                }
                i += 1;
            }
            if i >= chars.len() {
                return Err(FormatError::parse(line, "unterminated comment"));
            }
            i += 2;
            continue;
        }
        if c == '/' && next == Some('/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if current.is_empty() {
            start_line = line;
        }

        if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit())) {
            let begin = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                let after = chars.get(i + 1).copied();
                let signed_digit = matches!(after, Some('+' | '-'))
                    && chars.get(i + 2).is_some_and(|d| d.is_ascii_digit());
                if after.is_some_and(|d| d.is_ascii_digit()) || signed_digit {
                    i += if signed_digit { 2 } else { 1 };
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let literal: String = chars[begin..i].iter().collect();
            let value = literal
                .parse::<f64>()
                .map_err(|_| FormatError::parse(line, format!("bad number '{literal}'")))?;
            current.push((Token::Num(value), line));
            continue;
        }
        if c.is_alphabetic() || c == '_' {
            let begin = i;
            while i < chars.len() && is_ident_char(chars[i]) {
                i += 1;
            }
            current.push((Token::Ident(chars[begin..i].iter().collect()), line));
            continue;
        }

        let token = match (c, next) {
            ('<', Some('=')) | ('=', Some('<')) => {
                i += 1;
                Token::Cmp(Relation::LessEqual)
            }
            ('>', Some('=')) | ('=', Some('>')) => {
                i += 1;
                Token::Cmp(Relation::GreaterEqual)
            }
            ('=', Some('=')) => {
                i += 1;
                Token::Cmp(Relation::Equal)
            }
            ('<', _) => Token::Cmp(Relation::LessEqual),
            ('>', _) => Token::Cmp(Relation::GreaterEqual),
            ('=', _) => Token::Cmp(Relation::Equal),
            (':', _) => Token::Colon,
            (',', _) => Token::Comma,
            ('+', _) => Token::Plus,
            ('-', _) => Token::Minus,
            ('*', _) => Token::Star,
            (';', _) => {
                i += 1;
                statements.push((std::mem::take(&mut current), start_line));
                continue;
            }
            _ => return Err(FormatError::parse(line, format!("unexpected character '{c}'"))),
        };
        current.push((token, line));
        i += 1;
    }

    if !current.is_empty() {
        return Err(FormatError::parse(line, "missing ';' at end of input"));
    }
    Ok(statements)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || "_[]{}.&#$%~'@^".contains(c)
}

/// Linear expression: named terms plus a constant.
#[derive(Debug, Default)]
struct Expression {
    terms: Vec<(String, f64)>,
    constant: f64,
}

fn parse_expression(tokens: &[(Token, usize)], line: usize) -> Result<Expression, FormatError> {
    let mut expression = Expression::default();
    let mut i = 0;
    while i < tokens.len() {
        let mut sign = 1.0;
        let mut saw_sign = false;
        while let Some((Token::Plus | Token::Minus, _)) = tokens.get(i) {
            if tokens[i].0 == Token::Minus {
                sign = -sign;
            }
            saw_sign = true;
            i += 1;
        }
        if i > 0 && !saw_sign {
            return Err(FormatError::parse(line, "expected '+' or '-' between terms"));
        }
        match tokens.get(i).map(|(token, _)| token) {
            Some(Token::Num(value)) => {
                let coefficient = sign * value;
                i += 1;
                if let Some((Token::Star, _)) = tokens.get(i) {
                    i += 1;
                }
                match tokens.get(i) {
                    Some((Token::Ident(name), _)) => {
                        expression.terms.push((name.clone(), coefficient));
                        i += 1;
                    }
                    _ => expression.constant += coefficient,
                }
            }
            Some(Token::Ident(name)) => {
                expression.terms.push((name.clone(), sign));
                i += 1;
            }
            Some(other) => {
                return Err(FormatError::parse(line, format!("unexpected {other:?}")));
            }
            None => return Err(FormatError::parse(line, "expression ends with a sign")),
        }
    }
    Ok(expression)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Constraints,
    Sos(i32),
}

impl Draft {
    fn find_row(&self, label: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.name.as_deref() == Some(label))
            .or_else(|| {
                self.rows.iter().enumerate().find_map(|(index, row)| {
                    (row.name.is_none() && default_row_name(index + 1) == label).then_some(index)
                })
            })
    }

    fn objective(&mut self, tokens: &[(Token, usize)], line: usize) -> Result<bool, FormatError> {
        let mut body = tokens;
        let mut name = None;
        if let [(Token::Ident(label), _), (Token::Colon, _), rest @ ..] = body
            && let [(Token::Ident(keyword), _), (Token::Colon, _), ..] = rest
            && sense_keyword(keyword).is_some()
        {
            name = Some(label.clone());
            body = rest;
        }
        let sense = match body {
            [(Token::Ident(keyword), _), (Token::Colon, _), rest @ ..] => {
                sense_keyword(keyword).map(|maximize| (maximize, rest))
            }
            _ => None,
        };
        let (maximize, body) = match sense {
            Some(found) => found,
            None if !body.iter().any(|(t, _)| matches!(t, Token::Cmp(_)))
                && section_keyword(body).is_none() =>
            {
                (false, body)
            }
            None => return Ok(false),
        };
        let expression = parse_expression(body, line)?;
        self.maximize = maximize;
        self.objective_name = name;
        self.objective = self.resolve(&expression.terms);
        self.objective_constant = expression.constant;
        Ok(true)
    }

    fn constraint(&mut self, tokens: &[(Token, usize)], line: usize) -> Result<(), FormatError> {
        let (label, body) = match tokens {
            [(Token::Ident(label), _), (Token::Colon, _), rest @ ..] => (Some(label.clone()), rest),
            _ => (None, tokens),
        };

        let mut parts: Vec<&[(Token, usize)]> = Vec::new();
        let mut operators = Vec::new();
        let mut begin = 0;
        for (index, (token, _)) in body.iter().enumerate() {
            if let Token::Cmp(relation) = token {
                parts.push(&body[begin..index]);
                operators.push(*relation);
                begin = index + 1;
            }
        }
        parts.push(&body[begin..]);
        if parts.iter().skip(1).any(|part| part.is_empty()) {
            return Err(FormatError::parse(line, "missing right-hand side"));
        }

        match operators.as_slice() {
            [] => Err(FormatError::parse(line, "missing relational operator")),
            [relation] if parts[0].is_empty() => {
                let Some(label) = label else {
                    return Err(FormatError::parse(line, "missing left-hand side"));
                };
                let value = constant_of(parts[1], line)?;
                self.adjust_row(&label, *relation, value, line)
            }
            [relation] => {
                let lhs = parse_expression(parts[0], line)?;
                let rhs = parse_expression(parts[1], line)?;
                let mut terms = lhs.terms;
                terms.extend(rhs.terms.into_iter().map(|(name, value)| (name, -value)));
                let constant = rhs.constant - lhs.constant;
                self.relation(label, &terms, *relation, constant, line)
            }
            [first, second] => {
                if first != second || *first == Relation::Equal {
                    return Err(FormatError::parse(line, "inconsistent double inequality"));
                }
                let left = constant_of(parts[0], line)?;
                let middle = parse_expression(parts[1], line)?;
                let right = constant_of(parts[2], line)?;
                let (low, high) = if *first == Relation::LessEqual {
                    (left - middle.constant, right - middle.constant)
                } else {
                    (right - middle.constant, left - middle.constant)
                };
                if low > high {
                    return Err(FormatError::parse(line, "empty range"));
                }
                self.range(label, &middle.terms, low, high, *second)
            }
            _ => Err(FormatError::parse(line, "too many relational operators")),
        }
    }

    /// `expr op constant`: a bound when unlabeled on a single column,
    /// otherwise a new row.
    fn relation(
        &mut self,
        label: Option<String>,
        terms: &[(String, f64)],
        relation: Relation,
        rhs: f64,
        line: usize,
    ) -> Result<(), FormatError> {
        let resolved = self.resolve(terms);
        if label.is_none()
            && let [(column, coefficient)] = resolved.as_slice()
        {
            let value = rhs / coefficient;
            let relation = if *coefficient < 0.0 {
                flip(relation)
            } else {
                relation
            };
            let spec = &mut self.columns[column - 1];
            match relation {
                Relation::GreaterEqual => spec.lower = value,
                Relation::LessEqual => spec.upper = value,
                _ => {
                    spec.lower = value;
                    spec.upper = value;
                }
            }
            return Ok(());
        }
        if !rhs.is_finite() {
            return Err(FormatError::parse(line, "right-hand side is not finite"));
        }
        let relation = match relation {
            Relation::GreaterEqual if rhs <= -DEFAULT_INFINITY => Relation::Free,
            Relation::LessEqual if rhs >= DEFAULT_INFINITY => Relation::Free,
            other => other,
        };
        self.rows.push(RowSpec {
            name: label,
            terms: resolved,
            relation,
            rhs,
            range: None,
        });
        Ok(())
    }

    fn range(
        &mut self,
        label: Option<String>,
        terms: &[(String, f64)],
        low: f64,
        high: f64,
        relation: Relation,
    ) -> Result<(), FormatError> {
        let resolved = self.resolve(terms);
        if label.is_none()
            && let [(column, coefficient)] = resolved.as_slice()
        {
            let (a, b) = (low / coefficient, high / coefficient);
            let spec = &mut self.columns[column - 1];
            spec.lower = a.min(b);
            spec.upper = a.max(b);
            return Ok(());
        }
        let (relation, rhs, range) = if low <= -DEFAULT_INFINITY {
            (Relation::LessEqual, high, None)
        } else if high >= DEFAULT_INFINITY {
            (Relation::GreaterEqual, low, None)
        } else if relation == Relation::LessEqual {
            (Relation::LessEqual, high, Some(high - low))
        } else {
            (Relation::GreaterEqual, low, Some(high - low))
        };
        self.rows.push(RowSpec {
            name: label,
            terms: resolved,
            relation,
            rhs,
            range,
        });
        Ok(())
    }

    /// `label: op value` on an existing row.
    fn adjust_row(
        &mut self,
        label: &str,
        operator: Relation,
        value: f64,
        line: usize,
    ) -> Result<(), FormatError> {
        let index = self
            .find_row(label)
            .ok_or_else(|| FormatError::parse(line, format!("unknown row '{label}'")))?;
        let row = &mut self.rows[index];
        match (row.relation, operator) {
            (_, Relation::Equal) => {
                row.relation = Relation::Equal;
                row.rhs = value;
                row.range = None;
            }
            (Relation::Free, op) => {
                row.relation = op;
                row.rhs = value;
            }
            (Relation::LessEqual, Relation::GreaterEqual) => row.range = Some(row.rhs - value),
            (Relation::GreaterEqual, Relation::LessEqual) => row.range = Some(value - row.rhs),
            (Relation::Equal, _) => row.range = Some(value - row.rhs),
            _ => row.rhs = value,
        }
        Ok(())
    }

    fn declaration(
        &mut self,
        keyword: &str,
        tokens: &[(Token, usize)],
        line: usize,
    ) -> Result<(), FormatError> {
        for (token, _) in tokens {
            let name = match token {
                Token::Ident(name) => name,
                Token::Comma => continue,
                other => {
                    return Err(FormatError::parse(
                        line,
                        format!("unexpected {other:?} in {keyword} section"),
                    ));
                }
            };
            let column = self.column(name);
            let spec = &mut self.columns[column - 1];
            match keyword {
                "int" => spec.is_int = true,
                "bin" => {
                    spec.is_int = true;
                    spec.lower = 0.0;
                    spec.upper = 1.0;
                }
                "sec" => spec.is_semicont = true,
                "sin" => {
                    spec.is_int = true;
                    spec.is_semicont = true;
                }
                _ => {
                    spec.lower = -DEFAULT_INFINITY;
                    spec.upper = DEFAULT_INFINITY;
                }
            }
        }
        Ok(())
    }

    /// `name: col:weight,col:weight <= priority`
    fn sos_entry(
        &mut self,
        sos_type: i32,
        tokens: &[(Token, usize)],
        line: usize,
    ) -> Result<(), FormatError> {
        let [(Token::Ident(name), _), (Token::Colon, _), rest @ ..] = tokens else {
            return Err(FormatError::parse(line, "SOS entry needs a name"));
        };
        let mut members = Vec::new();
        let mut priority = self.sos.len() as i32 + 1;
        let mut i = 0;
        while i < rest.len() {
            match &rest[i..] {
                [(Token::Ident(column), _), (Token::Colon, _), (Token::Num(weight), _), ..] => {
                    members.push((self.column(column), *weight));
                    i += 3;
                }
                [(Token::Ident(column), _), ..] => {
                    let weight = members.len() as f64 + 1.0;
                    members.push((self.column(column), weight));
                    i += 1;
                }
                [(Token::Comma, _), ..] => i += 1,
                [(Token::Cmp(Relation::LessEqual), _), (Token::Num(value), _)] => {
                    priority = *value as i32;
                    i += 2;
                }
                _ => return Err(FormatError::parse(line, "malformed SOS entry")),
            }
        }
        self.sos.push(SosSpec {
            name: name.clone(),
            sos_type,
            priority,
            members,
        });
        Ok(())
    }
}

fn constant_of(tokens: &[(Token, usize)], line: usize) -> Result<f64, FormatError> {
    let expression = parse_expression(tokens, line)?;
    if expression.terms.is_empty() {
        Ok(expression.constant)
    } else {
        Err(FormatError::parse(line, "expected a constant"))
    }
}

fn flip(relation: Relation) -> Relation {
    match relation {
        Relation::LessEqual => Relation::GreaterEqual,
        Relation::GreaterEqual => Relation::LessEqual,
        other => other,
    }
}

/// `Some(true)` for maximize keywords, `Some(false)` for minimize keywords.
fn sense_keyword(word: &str) -> Option<bool> {
    match word.to_ascii_lowercase().as_str() {
        "max" | "maximize" | "maximise" | "maximum" => Some(true),
        "min" | "minimize" | "minimise" | "minimum" => Some(false),
        _ => None,
    }
}

/// Section keyword that starts a statement, if any.
fn section_keyword(tokens: &[(Token, usize)]) -> Option<String> {
    let [(Token::Ident(word), _), rest @ ..] = tokens else {
        return None;
    };
    let lower = word.to_ascii_lowercase();
    let is_declaration = matches!(lower.as_str(), "int" | "bin" | "sec" | "sin" | "free");
    let is_sos = lower.starts_with("sos") && lower[3..].parse::<i32>().is_ok();
    let followed_by_name = matches!(rest.first(), None | Some((Token::Ident(_), _)));
    let followed_by_entry = matches!(
        rest,
        [(Token::Ident(_), _), (Token::Colon, _), ..]
    );
    if (is_declaration && followed_by_name && !followed_by_entry) || (is_sos && followed_by_entry)
    {
        Some(lower)
    } else {
        None
    }
}

/// Parse LP text into a model.
pub fn parse_lp(text: &str) -> Result<Model, FormatError> {
    let statements = tokenize(text)?;
    let mut builder = Draft::default();
    let mut section = Section::Constraints;
    let mut first = true;

    for (tokens, line) in &statements {
        if tokens.is_empty() {
            if first {
                first = false;
            }
            continue;
        }
        if first {
            first = false;
            if builder.objective(tokens, *line)? {
                continue;
            }
        }
        if let Some(keyword) = section_keyword(tokens) {
            if let Some(sos_type) = keyword.strip_prefix("sos").and_then(|n| n.parse().ok()) {
                section = Section::Sos(sos_type);
                builder.sos_entry(sos_type, &tokens[1..], *line)?;
            } else {
                section = Section::Constraints;
                builder.declaration(&keyword, &tokens[1..], *line)?;
            }
            continue;
        }
        match section {
            Section::Sos(sos_type) => builder.sos_entry(sos_type, tokens, *line)?,
            Section::Constraints => builder.constraint(tokens, *line)?,
        }
    }
    builder.build()
}
