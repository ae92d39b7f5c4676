//! Recognizing parser.
//!
//! Only imports, module-level listeners and service declarations are parsed
//! into nodes. Any other module-level construct is skipped up to its
//! terminating `;` or the `}` that closes it.

use crate::lexer::{tokenize, Token, TokenKind};
use crate::tree::{
    AttachPoint, FieldData, FunctionData, ImportData, ListenerData, NodeData, NodeId, Param,
    ServiceData, SyntaxKind, SyntaxTree, TypeRef,
};
use crate::ParseError;
use mqtt_types::OffsetRange;

const MODULE_QUALIFIERS: &[&str] = &["public", "isolated", "final", "configurable"];
const MEMBER_QUALIFIERS: &[&str] = &[
    "public",
    "private",
    "isolated",
    "final",
    "remote",
    "resource",
    "transactional",
];

pub(crate) fn parse(text: &str) -> Result<SyntaxTree, ParseError> {
    let tokens = tokenize(text)?;
    tracing::trace!(tokens = tokens.len(), "Tokenized source");
    let mut parser = Parser {
        text,
        tokens,
        pos: 0,
        tree: SyntaxTree::with_root(text.len()),
    };
    parser.parse_module()?;
    Ok(parser.tree)
}

struct Parser<'t> {
    text: &'t str,
    tokens: Vec<Token>,
    pos: usize,
    tree: SyntaxTree,
}

fn opens(text: &str) -> bool {
    matches!(text, "(" | "[" | "{")
}

fn closes(text: &str) -> bool {
    matches!(text, ")" | "]" | "}")
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_nth(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).copied()
    }

    fn text_of(&self, token: Token) -> &'t str {
        token.text(self.text)
    }

    /// Whether the current token is the keyword or punctuator `s`.
    fn at(&self, s: &str) -> bool {
        self.nth_is(0, s)
    }

    fn nth_is(&self, n: usize, s: &str) -> bool {
        self.peek_nth(n).is_some_and(|t| {
            matches!(t.kind, TokenKind::Ident | TokenKind::Punct) && self.text_of(t) == s
        })
    }

    fn at_any(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.at(w))
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn eof(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedEof {
            expected,
            offset: self.text.len(),
        }
    }

    fn expect(&mut self, s: &str, expected: &'static str) -> Result<Token, ParseError> {
        let token = self.peek().ok_or_else(|| self.eof(expected))?;
        if self.at(s) {
            self.pos += 1;
            Ok(token)
        } else {
            Err(ParseError::Expected {
                expected,
                found: self.text_of(token).to_string(),
                offset: token.span.start,
            })
        }
    }

    fn expect_name(&mut self, expected: &'static str) -> Result<Token, ParseError> {
        let token = self.peek().ok_or_else(|| self.eof(expected))?;
        if token.is_name() {
            self.pos += 1;
            Ok(token)
        } else {
            Err(ParseError::Expected {
                expected,
                found: self.text_of(token).to_string(),
                offset: token.span.start,
            })
        }
    }

    fn slice(&self, first: Token, last: Token) -> &'t str {
        &self.text[first.span.start..last.span.end]
    }

    fn unbalanced(&self, token: Token) -> ParseError {
        ParseError::Unbalanced {
            delimiter: self.text_of(token).to_string(),
            offset: token.span.start,
        }
    }

    /// Consume tokens from an opening delimiter through its matching closer.
    fn skip_balanced(&mut self, expected: &'static str) -> Result<Token, ParseError> {
        let mut stack: Vec<Token> = Vec::new();
        loop {
            let token = self.bump().ok_or_else(|| self.eof(expected))?;
            if token.kind != TokenKind::Punct {
                continue;
            }
            let text = self.text_of(token);
            if opens(text) {
                stack.push(token);
            } else if closes(text) {
                let open = stack.pop().ok_or_else(|| self.unbalanced(token))?;
                let pair = matches!(
                    (self.text_of(open), text),
                    ("(", ")") | ("[", "]") | ("{", "}")
                );
                if !pair {
                    return Err(self.unbalanced(token));
                }
                if stack.is_empty() {
                    return Ok(token);
                }
            }
        }
    }

    /// Consume tokens up to and including the next `;` at nesting depth 0.
    fn skip_to_semicolon(&mut self, expected: &'static str) -> Result<Token, ParseError> {
        loop {
            let token = self.peek().ok_or_else(|| self.eof(expected))?;
            let text = self.text_of(token);
            if token.kind == TokenKind::Punct {
                if text == ";" {
                    self.pos += 1;
                    return Ok(token);
                }
                if opens(text) {
                    self.skip_balanced(expected)?;
                    continue;
                }
                if closes(text) {
                    return Err(self.unbalanced(token));
                }
            }
            self.pos += 1;
        }
    }

    /// Skip an annotation: `@name`, `@prefix:name` and an optional `{...}` value.
    fn skip_annotation(&mut self) -> Result<(), ParseError> {
        self.expect("@", "annotation")?;
        self.expect_name("annotation name")?;
        if self.at(":") {
            self.bump();
            self.expect_name("annotation name")?;
        }
        if self.at("{") {
            self.skip_balanced("annotation value")?;
        }
        Ok(())
    }

    fn parse_module(&mut self) -> Result<(), ParseError> {
        while self.peek().is_some() {
            if self.at("@") {
                self.skip_annotation()?;
                continue;
            }

            let start = self.pos;
            while self.at_any(MODULE_QUALIFIERS) {
                self.bump();
            }
            let start_offset = self.tokens[start].span.start;

            if self.at("import") && self.pos == start {
                self.parse_import()?;
            } else if self.at("listener") {
                self.parse_listener(start_offset)?;
            } else if self.at("service") && !self.nth_is(1, "class") {
                self.parse_service(start_offset)?;
            } else {
                self.skip_construct()?;
            }
        }
        Ok(())
    }

    /// Skip an unrecognized module-level construct.
    fn skip_construct(&mut self) -> Result<(), ParseError> {
        while let Some(token) = self.peek() {
            let text = self.text_of(token);
            if token.kind == TokenKind::Punct {
                if text == ";" {
                    self.pos += 1;
                    return Ok(());
                }
                if opens(text) {
                    let close = self.skip_balanced("closing delimiter")?;
                    if self.text_of(close) == "}" {
                        return Ok(());
                    }
                    continue;
                }
                if closes(text) {
                    return Err(self.unbalanced(token));
                }
            }
            self.pos += 1;
        }
        Ok(())
    }

    fn parse_import(&mut self) -> Result<(), ParseError> {
        let import = self.expect("import", "import")?;
        let first = self.expect_name("module name")?;

        let mut org = None;
        let mut module_path = Vec::new();
        if self.at("/") {
            self.bump();
            org = Some(self.text_of(first).to_string());
            let module = self.expect_name("module name")?;
            module_path.push(self.text_of(module).to_string());
        } else {
            module_path.push(self.text_of(first).to_string());
        }
        while self.at(".") {
            self.bump();
            let segment = self.expect_name("module name")?;
            module_path.push(self.text_of(segment).to_string());
        }

        let mut alias = None;
        if self.at("as") {
            self.bump();
            let name = self.expect_name("import prefix")?;
            alias = Some(self.text_of(name).trim_start_matches('\'').to_string());
        }
        let semi = self.expect(";", "';' after import")?;

        let root = self.tree.root();
        self.tree.alloc(
            SyntaxKind::ImportDecl,
            OffsetRange::new(import.span.start, semi.span.end),
            root,
            NodeData::Import(ImportData {
                org,
                module_path,
                alias,
            }),
        );
        Ok(())
    }

    /// Parse `prefix:Name` or `Name` at the cursor.
    fn parse_type_ref(&mut self) -> Option<TypeRef> {
        let first = self.peek().filter(Token::is_name)?;
        self.bump();
        if self.at(":") && self.peek_nth(1).is_some_and(|t| t.is_name()) {
            self.bump();
            let name = self.bump()?;
            return Some(TypeRef::new(Some(self.text_of(first)), self.text_of(name)));
        }
        Some(TypeRef::new(None, self.text_of(first)))
    }

    fn type_ref_from(&self, tokens: &[Token]) -> Option<TypeRef> {
        match tokens {
            [name] if name.is_name() => Some(TypeRef::new(None, self.text_of(*name))),
            [prefix, colon, name]
                if prefix.is_name() && self.text_of(*colon) == ":" && name.is_name() =>
            {
                Some(TypeRef::new(Some(self.text_of(*prefix)), self.text_of(*name)))
            }
            _ => None,
        }
    }

    fn parse_listener(&mut self, start: usize) -> Result<(), ParseError> {
        self.expect("listener", "listener")?;

        let mut header = Vec::new();
        while !self.at("=") {
            let token = self.bump().ok_or_else(|| self.eof("'=' in listener declaration"))?;
            header.push(token);
        }
        let (name, type_tokens) = header
            .split_last()
            .ok_or_else(|| ParseError::Expected {
                expected: "listener name",
                found: "=".to_string(),
                offset: self.peek().map_or(self.text.len(), |t| t.span.start),
            })?;
        let declared_type = self.type_ref_from(type_tokens);
        self.expect("=", "'='")?;

        let init_type = if self.at("new") {
            self.bump();
            self.parse_type_ref()
        } else {
            None
        };
        let semi = self.skip_to_semicolon("';' after listener declaration")?;

        let root = self.tree.root();
        self.tree.alloc(
            SyntaxKind::ListenerDecl,
            OffsetRange::new(start, semi.span.end),
            root,
            NodeData::Listener(ListenerData {
                name: self.text_of(*name).to_string(),
                declared_type,
                init_type,
            }),
        );
        Ok(())
    }

    fn parse_service(&mut self, start: usize) -> Result<(), ParseError> {
        self.expect("service", "service")?;

        let mut type_desc: Option<(Token, Token)> = None;
        while !self.at("on") {
            let token = self.bump().ok_or_else(|| self.eof("'on' in service declaration"))?;
            if token.kind == TokenKind::Punct && self.text_of(token) == "{" {
                return Err(ParseError::Expected {
                    expected: "'on' in service declaration",
                    found: "{".to_string(),
                    offset: token.span.start,
                });
            }
            type_desc = Some(type_desc.map_or((token, token), |(first, _)| (first, token)));
        }
        self.expect("on", "'on'")?;

        let mut attach_points = Vec::new();
        loop {
            attach_points.push(self.parse_attach_point()?);
            if self.at(",") {
                self.bump();
            } else {
                break;
            }
        }
        let open_brace = self.expect("{", "'{' to open service body")?;

        let root = self.tree.root();
        let service = self.tree.alloc(
            SyntaxKind::ServiceDecl,
            OffsetRange::new(start, open_brace.span.end),
            root,
            NodeData::Module,
        );

        while !self.at("}") {
            if self.peek().is_none() {
                return Err(self.eof("'}' to close service body"));
            }
            self.parse_member(service)?;
        }
        let close_brace = self.expect("}", "'}'")?;

        let type_desc = type_desc.map(|(first, last)| self.slice(first, last).to_string());
        self.tree.finish(
            service,
            OffsetRange::new(start, close_brace.span.end),
            NodeData::Service(ServiceData {
                type_desc,
                attach_points,
                open_brace: open_brace.span,
                close_brace: close_brace.span,
            }),
        );
        Ok(())
    }

    fn parse_attach_point(&mut self) -> Result<AttachPoint, ParseError> {
        let start = self.pos;
        while !(self.at(",") || self.at("{")) {
            let token = self.peek().ok_or_else(|| self.eof("'{' to open service body"))?;
            if token.kind == TokenKind::Punct && opens(self.text_of(token)) {
                self.skip_balanced("closing delimiter")?;
            } else {
                self.pos += 1;
            }
        }
        let tokens = &self.tokens[start..self.pos];
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            let found = self.peek().map_or("", |t| self.text_of(t)).to_string();
            return Err(ParseError::Expected {
                expected: "listener after 'on'",
                found,
                offset: self.peek().map_or(self.text.len(), |t| t.span.start),
            });
        };
        let span = OffsetRange::new(first.span.start, last.span.end);

        let attach = if tokens.len() == 1 && first.kind == TokenKind::Ident {
            AttachPoint::Listener {
                name: self.text_of(*first).to_string(),
                span,
            }
        } else if self.text_of(*first) == "new" {
            let type_end = tokens
                .iter()
                .position(|t| self.text_of(*t) == "(")
                .unwrap_or(tokens.len());
            AttachPoint::New {
                type_ref: self.type_ref_from(&tokens[1..type_end]),
                span,
            }
        } else {
            AttachPoint::Other { span }
        };
        Ok(attach)
    }

    fn parse_member(&mut self, service: NodeId) -> Result<(), ParseError> {
        while self.at("@") {
            self.skip_annotation()?;
        }
        let first = self.peek().ok_or_else(|| self.eof("service member"))?;

        let mut qualifiers = Vec::new();
        while self.at_any(MEMBER_QUALIFIERS) && !self.nth_is(1, "=") {
            let token = self.bump().ok_or_else(|| self.eof("service member"))?;
            qualifiers.push(self.text_of(token).to_string());
        }

        if self.at("function") {
            return self.parse_function(service, first, qualifiers);
        }

        let body_start = self.pos;
        let semi = self.skip_to_semicolon("';' after field")?;
        let name = self.field_name(&self.tokens[body_start..self.pos - 1]);
        self.tree.alloc(
            SyntaxKind::Field,
            OffsetRange::new(first.span.start, semi.span.end),
            service,
            NodeData::Field(FieldData { name }),
        );
        Ok(())
    }

    /// The identifier directly before the top-level `=` (or the end).
    fn field_name(&self, tokens: &[Token]) -> Option<String> {
        let mut depth = 0usize;
        let mut end = tokens.len();
        for (i, token) in tokens.iter().enumerate() {
            let text = self.text_of(*token);
            if token.kind != TokenKind::Punct {
                continue;
            }
            if opens(text) {
                depth += 1;
            } else if closes(text) {
                depth = depth.saturating_sub(1);
            } else if text == "=" && depth == 0 {
                end = i;
                break;
            }
        }
        tokens[..end]
            .last()
            .filter(|t| t.is_name())
            .map(|t| self.text_of(*t).to_string())
    }

    fn parse_function(
        &mut self,
        service: NodeId,
        first: Token,
        qualifiers: Vec<String>,
    ) -> Result<(), ParseError> {
        self.expect("function", "function")?;

        let is_resource = qualifiers.iter().any(|q| q == "resource");
        let name_first = self.expect_name("function name")?;
        let mut name_last = name_first;
        if is_resource {
            while !self.at("(") {
                name_last = self.bump().ok_or_else(|| self.eof("'(' after resource path"))?;
            }
        }
        let name = if is_resource {
            self.tokens_text(name_first, name_last)
        } else {
            self.text_of(name_first).to_string()
        };
        let name_span = OffsetRange::new(name_first.span.start, name_last.span.end);

        let (params, params_span) = self.parse_params()?;

        while !(self.at("{") || self.at(";")) {
            let token = self.peek().ok_or_else(|| self.eof("function body"))?;
            if token.kind == TokenKind::Punct && opens(self.text_of(token)) {
                self.skip_balanced("closing delimiter")?;
            } else {
                self.pos += 1;
            }
        }
        let end = if self.at(";") {
            self.bump().ok_or_else(|| self.eof("function body"))?
        } else {
            self.skip_balanced("'}' to close function body")?
        };

        let kind = if qualifiers.iter().any(|q| q == "remote") {
            SyntaxKind::RemoteMethod
        } else if is_resource {
            SyntaxKind::ResourceMethod
        } else {
            SyntaxKind::Method
        };
        self.tree.alloc(
            kind,
            OffsetRange::new(first.span.start, end.span.end),
            service,
            NodeData::Function(FunctionData {
                qualifiers,
                name,
                name_span,
                params,
                params_span,
            }),
        );
        Ok(())
    }

    /// Space-joined token texts, so `get  foo / bar` reads `get foo / bar`.
    fn tokens_text(&self, first: Token, last: Token) -> String {
        self.tokens
            .iter()
            .filter(|t| t.span.start >= first.span.start && t.span.end <= last.span.end)
            .map(|t| self.text_of(*t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn parse_params(&mut self) -> Result<(Vec<Param>, OffsetRange), ParseError> {
        let open = self.expect("(", "'(' to open parameter list")?;
        let mut params = Vec::new();
        let mut current: Vec<Token> = Vec::new();

        loop {
            let token = self.peek().ok_or_else(|| self.eof("')' to close parameter list"))?;
            let text = self.text_of(token);
            if token.kind == TokenKind::Punct && text == ")" {
                self.pos += 1;
                if let Some(param) = self.make_param(&current)? {
                    params.push(param);
                }
                return Ok((params, OffsetRange::new(open.span.start, token.span.end)));
            }
            if token.kind == TokenKind::Punct && text == "," {
                self.pos += 1;
                match self.make_param(&current)? {
                    Some(param) => params.push(param),
                    None => {
                        return Err(ParseError::Expected {
                            expected: "parameter",
                            found: ",".to_string(),
                            offset: token.span.start,
                        })
                    }
                }
                current.clear();
                continue;
            }
            if token.kind == TokenKind::Punct && opens(text) {
                let start = self.pos;
                self.skip_balanced("closing delimiter")?;
                current.extend_from_slice(&self.tokens[start..self.pos]);
                continue;
            }
            if token.kind == TokenKind::Punct && closes(text) {
                return Err(self.unbalanced(token));
            }
            current.push(token);
            self.pos += 1;
        }
    }

    fn make_param(&self, tokens: &[Token]) -> Result<Option<Param>, ParseError> {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Ok(None);
        };
        let default_at = tokens
            .iter()
            .position(|t| t.kind == TokenKind::Punct && self.text_of(*t) == "=");
        let decl = &tokens[..default_at.unwrap_or(tokens.len())];

        let Some((name, type_tokens)) = decl.split_last() else {
            return Err(ParseError::Expected {
                expected: "parameter name",
                found: "=".to_string(),
                offset: first.span.start,
            });
        };
        let (Some(type_first), Some(type_last)) = (type_tokens.first(), type_tokens.last()) else {
            return Err(ParseError::Expected {
                expected: "parameter type and name",
                found: self.slice(*first, *last).to_string(),
                offset: first.span.start,
            });
        };
        if !name.is_name() || self.text_of(*type_last) == ":" {
            return Err(ParseError::Expected {
                expected: "parameter type and name",
                found: self.slice(*first, *last).to_string(),
                offset: first.span.start,
            });
        }

        Ok(Some(Param {
            type_text: self.slice(*type_first, *type_last).to_string(),
            name: self.text_of(*name).to_string(),
            span: OffsetRange::new(first.span.start, last.span.end),
            has_default: default_at.is_some(),
        }))
    }
}
