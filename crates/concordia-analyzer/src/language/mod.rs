//! Built-in vocabulary of the Concordia language: decorators, keywords,
//! primitive types and `@expr` functions.

/// A decorator understood by the `cnd` compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorator {
    pub name: &'static str,
    pub doc: &'static str,
    /// Usage shown in completion details and hover code blocks.
    pub usage: &'static str,
}

const fn decorator_entry(
    name: &'static str,
    doc: &'static str,
    usage: &'static str,
) -> Decorator {
    Decorator {
        name,
        doc,
        usage,
    }
}

pub static DECORATORS: &[Decorator] = &[
    decorator_entry("version", "Sets the version of the schema.", "version(1)"),
    decorator_entry("import", "Imports another CND file.", "import(\"path/to/file.cnd\")"),
    decorator_entry("big_endian", "Sets the byte order to Big Endian for the following fields.", "big_endian"),
    decorator_entry("be", "Alias for @big_endian.", "be"),
    decorator_entry("little_endian", "Sets the byte order to Little Endian for the following fields.", "little_endian"),
    decorator_entry("le", "Alias for @little_endian.", "le"),
    decorator_entry("unaligned_bytes", "Marks a struct as containing unaligned bitfields.", "unaligned_bytes"),
    decorator_entry("fill", "Inserts padding bits/bytes. Can be used as a standalone statement.", "fill(1) or fill(0)"),
    decorator_entry("crc_refin", "Sets CRC input reflection.", "crc_refin"),
    decorator_entry("crc_refout", "Sets CRC output reflection.", "crc_refout"),
    decorator_entry("optional", "Marks a field as optional (implementation specific).", "optional"),
    decorator_entry(
        "count",
        "Sets the count for an array (fixed number or variable reference).",
        "count(N) or count(field_name)",
    ),
    decorator_entry("len", "Alias for @count.", "len(N) or len(field_name)"),
    decorator_entry("const", "Enforces a constant value for a field.", "const(VALUE)"),
    decorator_entry("match", "Alias for @const.", "match(VALUE)"),
    decorator_entry("pad", "Inserts padding bits.", "pad(BITS)"),
    decorator_entry("range", "Enforces a value range.", "range(MIN, MAX)"),
    decorator_entry("crc", "Calculates CRC over previous fields.", "crc(WIDTH)"),
    decorator_entry("crc_poly", "Sets CRC polynomial.", "crc_poly(POLY)"),
    decorator_entry("crc_init", "Sets CRC initial value.", "crc_init(VAL)"),
    decorator_entry("crc_xor", "Sets CRC XOR value.", "crc_xor(VAL)"),
    decorator_entry("scale", "Applies linear scaling (y = x * scale + offset).", "scale(FACTOR)"),
    decorator_entry("offset", "Applies offset for scaling.", "offset(VAL)"),
    decorator_entry("mul", "Multiplies value by factor.", "mul(FACTOR)"),
    decorator_entry("div", "Divides value by factor.", "div(FACTOR)"),
    decorator_entry("add", "Adds value.", "add(VAL)"),
    decorator_entry("sub", "Subtracts value.", "sub(VAL)"),
    decorator_entry("poly", "Applies polynomial transformation.", "poly(c0, c1, ...)"),
    decorator_entry("spline", "Applies spline transformation.", "spline(x0, y0, x1, y1, ...)"),
    decorator_entry("expr", "Calculates a value based on an expression.", "expr(expression)"),
    decorator_entry("eof", "Marks a byte array to consume all remaining bytes in the stream.", "eof"),
];

pub fn decorator(name: &str) -> Option<&'static Decorator> {
    DECORATORS.iter().find(|d| d.name == name)
}

pub static KEYWORDS: &[&str] = &[
    "import", "const", "enum", "true", "false", "prefix", "until", "max", "switch", "case", "default", "if", "else",
];

pub static PRIMITIVE_TYPES: &[&str] = &[
    "bool", "uint8", "uint16", "uint32", "uint64", "int8", "int16", "int32", "int64", "float32", "float64", "string",
    "bytes", "float", "double", "byte", "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64",
];

/// Types accepted after `enum Name :`.
pub static ENUM_INT_TYPES: &[&str] = &[
    "uint8", "u8", "byte", "int8", "i8", "uint16", "u16", "int16", "i16", "uint32", "u32", "int32", "i32", "uint64",
    "u64", "int64", "i64",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprFunctionKind {
    Math,
    Conversion,
}

impl ExprFunctionKind {
    pub fn detail(self) -> &'static str {
        match self {
            Self::Math => "Math Function",
            Self::Conversion => "Type Conversion",
        }
    }
}

/// Functions callable inside `@expr(...)`.
pub static EXPR_FUNCTIONS: &[(&str, ExprFunctionKind)] = &[
    ("sin", ExprFunctionKind::Math),
    ("cos", ExprFunctionKind::Math),
    ("tan", ExprFunctionKind::Math),
    ("sqrt", ExprFunctionKind::Math),
    ("log", ExprFunctionKind::Math),
    ("abs", ExprFunctionKind::Math),
    ("pow", ExprFunctionKind::Math),
    ("int", ExprFunctionKind::Conversion),
    ("float", ExprFunctionKind::Conversion),
];

#[cfg(test)]
#[path = "../../tests/src/language_tests.rs"]
mod tests;
