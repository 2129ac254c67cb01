//! Operator enums for binary, unary, assignment and relationship expressions.
//!
//! Each expression family carries its own operator type so that the
//! evaluator can match exhaustively per family. `as_symbol` returns the
//! source spelling used in diagnostics.

/// Arithmetic operators (`+ - * / % << >>`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
}

impl ArithmeticOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }

    /// Whether this operator has a collection meaning when the left operand
    /// is an Array or a Hash (`+` concatenate, `-` delete, `<<` append).
    pub const fn is_collection_op(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Shl)
    }
}

/// Comparison operators (`== != < <= > >=`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// Regular expression match operators (`=~ !~`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MatchOp {
    Match,
    NotMatch,
}

impl MatchOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Match => "=~",
            Self::NotMatch => "!~",
        }
    }
}

/// Relationship operators between resources (`-> ~> <- <~`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RelationshipOp {
    /// `->` left before right.
    Before,
    /// `~>` left notifies right.
    Notify,
    /// `<-` right before left.
    After,
    /// `<~` right notifies left.
    Subscribe,
}

impl RelationshipOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Before => "->",
            Self::Notify => "~>",
            Self::After => "<-",
            Self::Subscribe => "<~",
        }
    }
}

/// Assignment operators.
///
/// The parser accepts a compound form for every arithmetic operator; only
/// `+=` and `-=` have evaluation rules.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `<op>=`
    Compound(ArithmeticOp),
}

impl AssignOp {
    /// `+=`
    pub const ADD: AssignOp = AssignOp::Compound(ArithmeticOp::Add);
    /// `-=`
    pub const SUB: AssignOp = AssignOp::Compound(ArithmeticOp::Sub);

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Compound(op) => match op {
                ArithmeticOp::Add => "+=",
                ArithmeticOp::Sub => "-=",
                ArithmeticOp::Mul => "*=",
                ArithmeticOp::Div => "/=",
                ArithmeticOp::Mod => "%=",
                ArithmeticOp::Shl => "<<=",
                ArithmeticOp::Shr => ">>=",
            },
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
        }
    }
}
