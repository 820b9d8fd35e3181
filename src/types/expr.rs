//! Colour expression parsing and evaluation.
//!
//! Gradient endpoints and palette entries can use function-style expressions:
//! - `darken($gold, 20%)` - reduce lightness by percentage
//! - `lighten($gold, 20%)` - increase lightness by percentage
//! - `saturate($gold, 20%)` - increase saturation by percentage
//! - `desaturate($gold, 20%)` - decrease saturation by percentage
//! - `mix($a, $b, 50%)` - blend two colours
//! - `alpha($gold, 50%)` - set alpha channel

use crate::error::{IkonError, Result};
use crate::types::Colour;

/// A parsed colour expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ColourExpr {
    /// A hex literal: `#FF0000`
    Hex(String),
    /// A reference to a palette colour: `$gold`
    Reference(String),
    /// A function call: `darken($gold, 20%)`
    Function { name: String, args: Vec<ColourExpr> },
    /// A percentage value (only valid as a function argument): `20%`
    Percent(f32),
}

impl ColourExpr {
    /// Parse a colour expression from a string.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(IkonError::Parse {
                message: "Empty colour expression".to_string(),
                help: None,
            });
        }

        if input.starts_with('#') {
            return Ok(ColourExpr::Hex(input.to_string()));
        }

        if let Some(num_str) = input.strip_suffix('%') {
            let value: f32 = num_str.trim().parse().map_err(|_| IkonError::Parse {
                message: format!("Invalid percentage: {}", input),
                help: Some("Use format like 20% or 50.5%".to_string()),
            })?;
            return Ok(ColourExpr::Percent(value));
        }

        if let Some(paren_pos) = input.find('(') {
            let inner = input
                .strip_suffix(')')
                .ok_or_else(|| IkonError::Parse {
                    message: format!("Unclosed function call: {}", input),
                    help: Some("Add closing parenthesis".to_string()),
                })?;

            let name = inner[..paren_pos].trim().to_string();
            let args = split_args(&inner[paren_pos + 1..])?
                .iter()
                .map(|arg| ColourExpr::parse(arg))
                .collect::<Result<Vec<_>>>()?;

            return Ok(ColourExpr::Function { name, args });
        }

        // $name or a bare name reference
        let name = input.strip_prefix('$').unwrap_or(input);
        Ok(ColourExpr::Reference(name.to_string()))
    }

    /// Check if this is a simple value (hex or reference, not a function).
    pub fn is_simple(&self) -> bool {
        matches!(self, ColourExpr::Hex(_) | ColourExpr::Reference(_))
    }

    /// Collect the palette names this expression refers to.
    pub fn references(&self) -> Vec<&str> {
        match self {
            ColourExpr::Reference(name) => vec![name.as_str()],
            ColourExpr::Function { args, .. } => {
                args.iter().flat_map(|a| a.references()).collect()
            }
            _ => vec![],
        }
    }
}

/// Split comma-separated arguments, respecting nested parentheses.
fn split_args(input: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;

    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                if !current.trim().is_empty() {
                    args.push(current.trim().to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if depth != 0 {
        return Err(IkonError::Parse {
            message: format!("Unbalanced parentheses in arguments: {}", input),
            help: None,
        });
    }

    if !current.trim().is_empty() {
        args.push(current.trim().to_string());
    }

    Ok(args)
}

/// Colour expression evaluator.
///
/// Evaluates expressions by resolving references through a lookup function.
pub struct ExprEvaluator<F>
where
    F: Fn(&str) -> Option<Colour>,
{
    lookup: F,
}

impl<F> ExprEvaluator<F>
where
    F: Fn(&str) -> Option<Colour>,
{
    /// Create a new evaluator with the given colour lookup function.
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Evaluate an expression to a colour.
    pub fn eval(&self, expr: &ColourExpr) -> Result<Colour> {
        match expr {
            ColourExpr::Hex(hex) => Colour::from_hex(hex),

            ColourExpr::Reference(name) => (self.lookup)(name).ok_or_else(|| IkonError::Parse {
                message: format!("Undefined colour: ${}", name),
                help: None,
            }),

            ColourExpr::Percent(_) => Err(IkonError::Parse {
                message: "Percentage cannot be evaluated as a colour".to_string(),
                help: Some("Percentages are only valid as function arguments".to_string()),
            }),

            ColourExpr::Function { name, args } => self.eval_function(name, args),
        }
    }

    fn eval_function(&self, name: &str, args: &[ColourExpr]) -> Result<Colour> {
        match name {
            "darken" => {
                let (colour, pct) = self.colour_and_percent(args, name)?;
                Ok(adjust_hsl(colour, -pct, Channel::Lightness))
            }
            "lighten" => {
                let (colour, pct) = self.colour_and_percent(args, name)?;
                Ok(adjust_hsl(colour, pct, Channel::Lightness))
            }
            "saturate" => {
                let (colour, pct) = self.colour_and_percent(args, name)?;
                Ok(adjust_hsl(colour, pct, Channel::Saturation))
            }
            "desaturate" => {
                let (colour, pct) = self.colour_and_percent(args, name)?;
                Ok(adjust_hsl(colour, -pct, Channel::Saturation))
            }
            "alpha" => {
                let (colour, pct) = self.colour_and_percent(args, name)?;
                let a = ((pct / 100.0) * 255.0).clamp(0.0, 255.0).round() as u8;
                Ok(colour.with_alpha(a))
            }
            "mix" => {
                if args.len() != 3 {
                    return Err(IkonError::Parse {
                        message: format!("mix() requires 3 arguments, got {}", args.len()),
                        help: Some("Usage: mix($colour1, $colour2, 50%)".to_string()),
                    });
                }
                let a = self.eval(&args[0])?;
                let b = self.eval(&args[1])?;
                let pct = self.percent(&args[2], "mix")?;
                Ok(a.lerp(b, pct / 100.0))
            }
            _ => Err(IkonError::Parse {
                message: format!("Unknown colour function: {}", name),
                help: Some(
                    "Available functions: darken, lighten, saturate, desaturate, mix, alpha"
                        .to_string(),
                ),
            }),
        }
    }

    /// Helper: expect (colour, percent) arguments.
    fn colour_and_percent(&self, args: &[ColourExpr], func: &str) -> Result<(Colour, f32)> {
        if args.len() != 2 {
            return Err(IkonError::Parse {
                message: format!("{}() requires 2 arguments, got {}", func, args.len()),
                help: Some(format!("Usage: {}($colour, 20%)", func)),
            });
        }

        let colour = self.eval(&args[0])?;
        let percent = self.percent(&args[1], func)?;

        Ok((colour, percent))
    }

    /// Helper: expect a percentage argument.
    fn percent(&self, expr: &ColourExpr, func: &str) -> Result<f32> {
        match expr {
            ColourExpr::Percent(p) => Ok(*p),
            _ => Err(IkonError::Parse {
                message: format!("{}() requires a percentage argument", func),
                help: Some(format!("Usage: {}($colour, 20%)", func)),
            }),
        }
    }
}

#[derive(Clone, Copy)]
enum Channel {
    Lightness,
    Saturation,
}

/// Adjust lightness or saturation in HSL space.
///
/// Positive percentages move the channel toward 1.0 relative to the remaining
/// headroom; negative percentages move it toward 0.0 relative to its value.
fn adjust_hsl(colour: Colour, percent: f32, channel: Channel) -> Colour {
    use palette::{Hsl, IntoColor, Srgb};

    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );

    let mut hsl: Hsl = rgb.into_color();

    let value = match channel {
        Channel::Lightness => &mut hsl.lightness,
        Channel::Saturation => &mut hsl.saturation,
    };

    let delta = percent / 100.0;
    if delta > 0.0 {
        *value += (1.0 - *value) * delta;
    } else {
        *value += *value * delta;
    }
    *value = value.clamp(0.0, 1.0);

    let out: Srgb<f32> = hsl.into_color();
    Colour::new(
        (out.red * 255.0).round() as u8,
        (out.green * 255.0).round() as u8,
        (out.blue * 255.0).round() as u8,
        colour.a,
    )
}
