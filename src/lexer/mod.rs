use lachs::Span;

#[lachs::token]
pub enum Token {
    #[terminal("function")]
    Function,
    #[terminal("int")]
    Int,
    #[terminal("bool")]
    Bool,
    #[terminal("var")]
    Var,
    #[terminal("if")]
    If,
    #[terminal("else")]
    Else,
    #[terminal("while")]
    While,
    #[terminal("return")]
    Return,
    #[terminal("true")]
    True,
    #[terminal("false")]
    False,
    #[terminal("and")]
    And,
    #[terminal("or")]
    Or,
    #[literal("[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[literal("[0-9]+")]
    Integer,
    #[terminal(":=")]
    Assign,
    #[terminal("==")]
    DoubleEquals,
    #[terminal("<")]
    LessThan,
    #[terminal(">")]
    GreaterThan,
    #[terminal("+")]
    Plus,
    #[terminal("-")]
    Minus,
    #[terminal("*")]
    Star,
    #[terminal("/")]
    Slash,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
    #[terminal("{")]
    LBrace,
    #[terminal("}")]
    RBrace,
    #[terminal(",")]
    Comma,
    #[terminal(";")]
    Semicolon,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Function(inner) => inner.position.clone(),
            Token::Int(inner) => inner.position.clone(),
            Token::Bool(inner) => inner.position.clone(),
            Token::Var(inner) => inner.position.clone(),
            Token::If(inner) => inner.position.clone(),
            Token::Else(inner) => inner.position.clone(),
            Token::While(inner) => inner.position.clone(),
            Token::Return(inner) => inner.position.clone(),
            Token::True(inner) => inner.position.clone(),
            Token::False(inner) => inner.position.clone(),
            Token::And(inner) => inner.position.clone(),
            Token::Or(inner) => inner.position.clone(),
            Token::Ident(inner) => inner.position.clone(),
            Token::Integer(inner) => inner.position.clone(),
            Token::Assign(inner) => inner.position.clone(),
            Token::DoubleEquals(inner) => inner.position.clone(),
            Token::LessThan(inner) => inner.position.clone(),
            Token::GreaterThan(inner) => inner.position.clone(),
            Token::Plus(inner) => inner.position.clone(),
            Token::Minus(inner) => inner.position.clone(),
            Token::Star(inner) => inner.position.clone(),
            Token::Slash(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::LBrace(inner) => inner.position.clone(),
            Token::RBrace(inner) => inner.position.clone(),
            Token::Comma(inner) => inner.position.clone(),
            Token::Semicolon(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Function(_) => "'function'".to_string(),
            Token::Int(_) => "'int'".to_string(),
            Token::Bool(_) => "'bool'".to_string(),
            Token::Var(_) => "'var'".to_string(),
            Token::If(_) => "'if'".to_string(),
            Token::Else(_) => "'else'".to_string(),
            Token::While(_) => "'while'".to_string(),
            Token::Return(_) => "'return'".to_string(),
            Token::True(_) => "'true'".to_string(),
            Token::False(_) => "'false'".to_string(),
            Token::And(_) => "'and'".to_string(),
            Token::Or(_) => "'or'".to_string(),
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
            Token::Integer(inner) => format!("integer '{}'", inner.value),
            Token::Assign(_) => "':='".to_string(),
            Token::DoubleEquals(_) => "'=='".to_string(),
            Token::LessThan(_) => "'<'".to_string(),
            Token::GreaterThan(_) => "'>'".to_string(),
            Token::Plus(_) => "'+'".to_string(),
            Token::Minus(_) => "'-'".to_string(),
            Token::Star(_) => "'*'".to_string(),
            Token::Slash(_) => "'/'".to_string(),
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::LBrace(_) => "'{'".to_string(),
            Token::RBrace(_) => "'}'".to_string(),
            Token::Comma(_) => "','".to_string(),
            Token::Semicolon(_) => "';'".to_string(),
        }
    }
}

/// Blank out `//` line comments.
///
/// Comment characters are replaced by spaces rather than removed so that the
/// spans of the remaining tokens still point at the original source.
pub fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut in_comment = false;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
                result.push(c);
            } else {
                result.push(' ');
            }
            continue;
        }

        if c == '/' && chars.peek() == Some(&'/') {
            in_comment = true;
            result.push(' ');
            continue;
        }

        result.push(c);
    }

    result
}
