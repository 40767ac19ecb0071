//! Expression parsing.

use super::error::Result;
use super::parser::Parser;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use crate::ast::{
    BinaryOp, DataType, Expr, ExprKind, Function, OrderBy, OrderDirection, NullOrdering,
    Parameter, UnaryOp, WhenClause,
};
use crate::lexer::{Keyword, TokenKind};

/// Units accepted after an interval value.
const INTERVAL_UNITS: &[&str] = &[
    "microsecond",
    "microseconds",
    "second",
    "seconds",
    "sec",
    "minute",
    "minutes",
    "min",
    "hour",
    "hours",
    "day",
    "days",
    "week",
    "weeks",
    "month",
    "months",
    "quarter",
    "quarters",
    "year",
    "years",
];

impl Parser<'_> {
    /// Parses an expression whose operators bind at least as tightly as `min_bp`.
    pub(super) fn parse_expression(&mut self, min_bp: u8) -> Result<Expr> {
        self.descend()?;
        let expr = self.parse_expression_bp(min_bp);
        self.ascend();
        expr
    }

    // Everything from here to `parse_parenthesized` runs once per nesting level.
    // Keep their locals small.
    fn parse_expression_bp(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_prefix()?;
        while let Some((negated, r_bp)) = self.next_infix(min_bp) {
            if negated {
                self.advance();
            }
            lhs = self.parse_infix(lhs, negated, r_bp)?;
        }
        Ok(lhs)
    }

    /// Returns whether the next operator is negated and its right binding power,
    /// or `None` if the expression ends here.
    fn next_infix(&self, min_bp: u8) -> Option<(bool, u8)> {
        // `NOT` only continues an expression as NOT IN / NOT LIKE / NOT BETWEEN
        let negated = self.check_keyword(Keyword::Not)
            && (self.peek_keyword(Keyword::In)
                || self.peek_keyword(Keyword::Like)
                || self.peek_keyword(Keyword::Between));
        let operator = if negated {
            &self.peeked.kind
        } else {
            &self.current.kind
        };
        let (l_bp, r_bp) = infix_binding_power(operator)?;
        if l_bp < min_bp {
            return None;
        }
        let special = matches!(
            operator,
            TokenKind::Keyword(Keyword::Is | Keyword::In | Keyword::Between)
        );
        (special || token_to_binary_op(operator).is_some()).then_some((negated, r_bp))
    }

    /// Applies the operator at the current token to `lhs`.
    fn parse_infix(&mut self, lhs: Expr, negated: bool, r_bp: u8) -> Result<Expr> {
        match self.current.as_keyword() {
            Some(Keyword::Is) => {
                self.advance();
                let op = if self.check_keyword(Keyword::Not) {
                    self.advance();
                    BinaryOp::IsNot
                } else {
                    BinaryOp::Is
                };
                let rhs = self.parse_expression(r_bp)?;
                Ok(Expr::binary(op, lhs, rhs))
            }
            Some(Keyword::In) => {
                self.advance();
                let rhs = self.parse_in_operand(r_bp)?;
                let op = if negated { BinaryOp::NotIn } else { BinaryOp::In };
                Ok(Expr::binary(op, lhs, rhs))
            }
            Some(Keyword::Between) => {
                self.advance();
                let low = self.parse_expression(r_bp)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(r_bp)?;
                Ok(Expr::new(ExprKind::Between {
                    expr: Box::new(lhs),
                    low: Box::new(low),
                    high: Box::new(high),
                    negated,
                }))
            }
            _ => {
                let Some(op) = token_to_binary_op(&self.current.kind) else {
                    return Err(self.unexpected("operator"));
                };
                let op = if negated { op.negated().unwrap_or(op) } else { op };
                self.advance();
                let rhs = self.parse_expression(r_bp)?;
                Ok(Expr::binary(op, lhs, rhs))
            }
        }
    }

    /// Parses the right side of IN: a parenthesized list, a subquery or an
    /// expression.
    fn parse_in_operand(&mut self, r_bp: u8) -> Result<Expr> {
        if !self.check(&TokenKind::LeftParen) {
            return self.parse_expression(r_bp);
        }
        if self.peek_keyword(Keyword::Select) {
            let query = self.parse_query_term()?;
            return Ok(Expr::new(ExprKind::Subquery(Box::new(query))));
        }
        self.advance();
        let items = self.parse_expression_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::tuple(items))
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr> {
        if self.check_keyword(Keyword::Not) && self.peek_keyword(Keyword::Exists) {
            self.advance();
            return self.parse_exists(true);
        }
        match token_to_unary_op(&self.current.kind) {
            Some(op) => self.parse_unary(op),
            None => self.parse_primary(),
        }
    }

    /// Parses the operand of a unary operator; the operator is the current token.
    fn parse_unary(&mut self, op: UnaryOp) -> Result<Expr> {
        let bp = prefix_binding_power(&self.current.kind).unwrap_or(17);
        self.advance();
        if op == UnaryOp::Neg {
            // A minus sign directly before a number folds into the literal
            match self.current.kind {
                TokenKind::Integer(value) => {
                    self.advance();
                    return Ok(Expr::integer(-value));
                }
                TokenKind::Float(value) => {
                    self.advance();
                    return Ok(Expr::float(-value));
                }
                _ => {}
            }
        }
        let operand = self.parse_expression(bp)?;
        Ok(Expr::unary(op, operand))
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Null) => {
                self.parse_atom()
            }
            TokenKind::LeftParen => self.parse_parenthesized(),

            // Keyword-led forms
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(),
            TokenKind::Keyword(Keyword::Exists) => self.parse_exists(false),
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval(),
            TokenKind::Keyword(Keyword::Last) if !self.peek_is(&TokenKind::LeftParen) => {
                self.advance();
                Ok(Expr::new(ExprKind::Last))
            }
            TokenKind::Keyword(Keyword::Latest) if !self.peek_is(&TokenKind::LeftParen) => {
                self.advance();
                Ok(Expr::new(ExprKind::Latest))
            }
            TokenKind::Keyword(kw)
                if kw.can_name_function() && self.peek_is(&TokenKind::LeftParen) =>
            {
                let name = self.current_text().to_string();
                self.advance();
                self.parse_function_call(None, name)
            }

            // Column references and namespaced calls
            TokenKind::Identifier(_) => self.parse_column_or_function(),
            TokenKind::Keyword(kw) if !kw.is_reserved() => self.parse_column_or_function(),

            _ => self.parse_atom(),
        }
    }

    /// Parses a literal or a marker (`?`, `:name`, `@var`, `@@var`, `*`).
    fn parse_atom(&mut self) -> Result<Expr> {
        let expr = match &self.current.kind {
            TokenKind::Integer(value) => Expr::integer(*value),
            TokenKind::Float(value) => Expr::float(*value),
            TokenKind::String(value) | TokenKind::DoubleQuotedString(value) => {
                Expr::string(value.clone())
            }
            TokenKind::Keyword(Keyword::True) => Expr::boolean(true),
            TokenKind::Keyword(Keyword::False) => Expr::boolean(false),
            TokenKind::Keyword(Keyword::Null) => Expr::null(),
            TokenKind::Question => Expr::parameter(Parameter::Positional),
            TokenKind::NamedParameter(name) => Expr::parameter(Parameter::Named(name.clone())),
            TokenKind::Variable(name) => Expr::variable(name.clone(), false),
            TokenKind::SystemVariable(name) => Expr::variable(name.clone(), true),
            TokenKind::Star => Expr::star(),
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(expr)
    }

    /// Parses a dotted name, or a call when the name is followed by `(`.
    fn parse_column_or_function(&mut self) -> Result<Expr> {
        let mut ident = self.parse_identifier_path()?;
        if self.check(&TokenKind::LeftParen) && ident.name() != "*" {
            let name = ident.parts.pop().unwrap_or_default();
            let namespace = (!ident.parts.is_empty()).then(|| ident.parts.join("."));
            return self.parse_function_call(namespace, name);
        }
        Ok(Expr::new(ExprKind::Identifier(ident)))
    }

    /// Parses `(expr)`, `(a, b, ...)` or `(SELECT ...)`.
    fn parse_parenthesized(&mut self) -> Result<Expr> {
        if self.peek_keyword(Keyword::Select) {
            let query = self.parse_query_term()?;
            return Ok(Expr::new(ExprKind::Subquery(Box::new(query))));
        }

        self.expect(&TokenKind::LeftParen)?;
        let first = self.parse_expression(0)?;
        if self.check(&TokenKind::Comma) {
            return self.parse_tuple_rest(first);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(first.parenthesized())
    }

    /// Parses the remaining items of `(first, ...)`; the current token is a comma.
    fn parse_tuple_rest(&mut self, first: Expr) -> Result<Expr> {
        let mut items = vec![first];
        while self.check(&TokenKind::Comma) {
            self.advance();
            items.push(self.parse_expression(0)?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::tuple(items))
    }

    /// Parses the argument list of a call; the name has been consumed.
    fn parse_function_call(&mut self, namespace: Option<String>, name: String) -> Result<Expr> {
        self.expect(&TokenKind::LeftParen)?;

        let mut distinct = false;
        let mut args = Vec::new();
        let mut from_arg = None;
        if !self.check(&TokenKind::RightParen) {
            if self.check_keyword(Keyword::Distinct) {
                self.advance();
                distinct = true;
            }
            args = self.parse_expression_list()?;
            if self.check_keyword(Keyword::From) {
                self.advance();
                from_arg = Some(Box::new(self.parse_expression(0)?));
            }
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::new(ExprKind::Function(Function {
            name,
            namespace,
            args,
            distinct,
            from_arg,
        })))
    }

    /// Parses `CAST(expr AS type)`.
    fn parse_cast(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let arg = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::new(ExprKind::TypeCast {
            arg: Box::new(arg),
            data_type,
        }))
    }

    /// Parses a type name with optional `(n[, m])` arguments.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType> {
        let name = self.expect_identifier()?;
        let mut args = Vec::new();
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            loop {
                match self.current.kind {
                    TokenKind::Integer(value) => {
                        let value = u32::try_from(value).map_err(|_| {
                            self.invalid_literal("Type argument out of range", self.current.span)
                        })?;
                        args.push(value);
                        self.advance();
                    }
                    TokenKind::Float(_) | TokenKind::String(_) => {
                        return Err(self.invalid_literal(
                            "Type argument must be an integer",
                            self.current.span,
                        ));
                    }
                    _ => return Err(self.unexpected("type argument")),
                }
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            self.expect(&TokenKind::RightParen)?;
        }
        Ok(DataType { name, args })
    }

    /// Parses a CASE expression.
    fn parse_case(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::Case)?;

        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression(0)?))
        };

        let mut when_clauses = Vec::new();
        while self.check_keyword(Keyword::When) {
            self.advance();
            let condition = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression(0)?;
            when_clauses.push(WhenClause { condition, result });
        }
        if when_clauses.is_empty() {
            return Err(self.unexpected("WHEN"));
        }

        let else_result = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::new(ExprKind::Case {
            operand,
            when_clauses,
            else_result,
        }))
    }

    /// Parses `EXISTS (subquery)`; the leading NOT of `NOT EXISTS` has been consumed.
    fn parse_exists(&mut self, negated: bool) -> Result<Expr> {
        self.expect_keyword(Keyword::Exists)?;
        if !(self.check(&TokenKind::LeftParen) && self.peek_starts_query()) {
            return Err(self.unexpected("subquery"));
        }
        let query = Box::new(self.parse_query_term()?);
        let kind = if negated {
            ExprKind::NotExists(query)
        } else {
            ExprKind::Exists(query)
        };
        Ok(Expr::new(kind))
    }

    /// Parses `INTERVAL '1 day'`, `INTERVAL '1' day` or `INTERVAL 1 day`.
    fn parse_interval(&mut self) -> Result<Expr> {
        self.expect_keyword(Keyword::Interval)?;
        let value = match &self.current.kind {
            TokenKind::String(value) | TokenKind::DoubleQuotedString(value) => value.clone(),
            TokenKind::Integer(_) | TokenKind::Float(_) => {
                let number = self.current_text().to_string();
                self.advance();
                let unit = self.parse_interval_unit()?;
                return Ok(Expr::new(ExprKind::Interval(format!("{number} {unit}"))));
            }
            _ => return Err(self.unexpected("interval value")),
        };
        self.advance();
        let value = match self.current.kind {
            TokenKind::Identifier(ref word) if is_interval_unit(word) => {
                let unit = word.clone();
                self.advance();
                format!("{value} {unit}")
            }
            _ => value,
        };
        Ok(Expr::new(ExprKind::Interval(value)))
    }

    fn parse_interval_unit(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::Identifier(word) if is_interval_unit(word) => {
                let unit = word.clone();
                self.advance();
                Ok(unit)
            }
            _ => Err(self.unexpected("interval unit")),
        }
    }

    /// Parses a comma-separated list of expressions.
    pub(super) fn parse_expression_list(&mut self) -> Result<Vec<Expr>> {
        let mut exprs = vec![self.parse_expression(0)?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            exprs.push(self.parse_expression(0)?);
        }
        Ok(exprs)
    }

    /// Parses ORDER BY entries.
    pub(super) fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>> {
        let mut items = Vec::new();
        loop {
            let field = self.parse_expression(0)?;
            let direction = if self.check_keyword(Keyword::Asc) {
                self.advance();
                Some(OrderDirection::Asc)
            } else if self.check_keyword(Keyword::Desc) {
                self.advance();
                Some(OrderDirection::Desc)
            } else {
                None
            };
            let nulls = if self.check_keyword(Keyword::Nulls) {
                self.advance();
                if self.check_keyword(Keyword::First) {
                    self.advance();
                    Some(NullOrdering::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullOrdering::Last)
                }
            } else {
                None
            };
            items.push(OrderBy {
                field,
                direction,
                nulls,
            });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    /// Parses GROUP BY entries with an optional trailing `WITH ROLLUP`.
    pub(super) fn parse_group_by_list(&mut self) -> Result<Vec<Expr>> {
        let mut items = self.parse_expression_list()?;
        if self.check_keyword(Keyword::With) && self.peek_keyword(Keyword::Rollup) {
            self.advance();
            self.advance();
            if let Some(last) = items.last_mut() {
                last.with_rollup = true;
            }
        }
        Ok(items)
    }
}

fn is_interval_unit(word: &str) -> bool {
    INTERVAL_UNITS
        .iter()
        .any(|unit| unit.eq_ignore_ascii_case(word))
}
