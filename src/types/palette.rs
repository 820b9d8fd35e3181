//! Palette type for named colour collections.

use std::collections::{HashMap, HashSet};

use crate::error::{IkonError, Result};

use super::expr::{ColourExpr, ExprEvaluator};
use super::Colour;

/// A collection of named colours with optional variants.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Palette name
    pub name: String,

    /// Base colours (resolved to actual RGBA values)
    colours: HashMap<String, Colour>,

    /// Variant overrides (variant_name -> colour_name -> colour)
    variants: HashMap<String, HashMap<String, Colour>>,
}

impl Palette {
    /// Create a new empty palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colours: HashMap::new(),
            variants: HashMap::new(),
        }
    }

    /// Create the builtin default palette.
    pub fn default_palette() -> Self {
        let mut palette = Self::new("default");
        palette.colours.insert("black".to_string(), Colour::BLACK);
        palette.colours.insert("white".to_string(), Colour::WHITE);
        palette
            .colours
            .insert("ink".to_string(), Colour::rgb(26, 26, 46));
        palette
            .colours
            .insert("paper".to_string(), Colour::rgb(240, 238, 228));
        palette
    }

    /// Get a colour by name.
    pub fn get(&self, name: &str) -> Option<Colour> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.colours.get(name).copied()
    }

    /// Get a colour with a variant applied, falling back to the base colour.
    pub fn get_with_variant(&self, name: &str, variant: &str) -> Option<Colour> {
        let name = name.strip_prefix('$').unwrap_or(name);

        self.variants
            .get(variant)
            .and_then(|v| v.get(name))
            .copied()
            .or_else(|| self.colours.get(name).copied())
    }

    /// Get all colour names.
    pub fn colour_names(&self) -> impl Iterator<Item = &str> {
        self.colours.keys().map(|s| s.as_str())
    }

    /// Get all variant names.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(|s| s.as_str())
    }

    /// Check if the palette has a variant.
    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Get the number of base colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette has no colours.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub(crate) fn insert(&mut self, name: String, colour: Colour) {
        self.colours.insert(name, colour);
    }

    pub(crate) fn insert_variant(&mut self, variant: String, name: String, colour: Colour) {
        self.variants.entry(variant).or_default().insert(name, colour);
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_palette()
    }
}

/// Builder for constructing palettes from parsed definitions.
///
/// Definitions are kept unresolved until `build()`, so colours can reference
/// each other regardless of declaration order.
#[derive(Debug)]
pub struct PaletteBuilder {
    name: String,
    /// Unresolved definitions in declaration order
    definitions: Vec<(String, ColourExpr)>,
    /// Variant definitions: variant_name -> [(colour_name, expr)]
    variant_defs: Vec<(String, String, ColourExpr)>,
}

impl PaletteBuilder {
    /// Create a new palette builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
            variant_defs: Vec::new(),
        }
    }

    /// Add a colour definition (hex, reference, or expression).
    pub fn define(&mut self, name: impl Into<String>, value: &str) -> Result<()> {
        let expr = ColourExpr::parse(value)?;
        self.definitions.push((name.into(), expr));
        Ok(())
    }

    /// Add a variant colour override.
    pub fn define_variant(
        &mut self,
        variant: impl Into<String>,
        name: impl Into<String>,
        value: &str,
    ) -> Result<()> {
        let expr = ColourExpr::parse(value)?;
        self.variant_defs.push((variant.into(), name.into(), expr));
        Ok(())
    }

    /// Get the palette name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of base colour definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the builder has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Build the palette, resolving all references and expressions.
    ///
    /// References between colours in the same palette are resolved with cycle
    /// detection; a reference cycle is a parse error.
    pub fn build(self) -> Result<Palette> {
        let mut palette = Palette::new(self.name.clone());

        let defs: HashMap<&str, &ColourExpr> = self
            .definitions
            .iter()
            .map(|(name, expr)| (name.as_str(), expr))
            .collect();

        let mut resolved: HashMap<String, Colour> = HashMap::new();
        for (name, _) in &self.definitions {
            let mut in_progress = HashSet::new();
            resolve_colour(name, &defs, &mut resolved, &mut in_progress)?;
        }

        for (name, colour) in resolved {
            palette.insert(name, colour);
        }

        // Variant expressions resolve against the finished base colours.
        for (variant, name, expr) in &self.variant_defs {
            let eval = ExprEvaluator::new(|n: &str| palette.get(n));
            let colour = eval.eval(expr)?;
            palette.insert_variant(variant.clone(), name.clone(), colour);
        }

        Ok(palette)
    }
}

/// Resolve a single colour, recursing through references.
fn resolve_colour(
    name: &str,
    defs: &HashMap<&str, &ColourExpr>,
    resolved: &mut HashMap<String, Colour>,
    in_progress: &mut HashSet<String>,
) -> Result<Colour> {
    if let Some(colour) = resolved.get(name) {
        return Ok(*colour);
    }

    if !in_progress.insert(name.to_string()) {
        return Err(IkonError::Parse {
            message: format!("Circular colour reference involving ${}", name),
            help: Some("Colour definitions cannot reference themselves in a cycle".to_string()),
        });
    }

    let expr = defs.get(name).ok_or_else(|| IkonError::Parse {
        message: format!("Undefined colour: ${}", name),
        help: None,
    })?;

    // Resolve any references this expression needs first.
    for reference in expr.references() {
        if !resolved.contains_key(reference) && defs.contains_key(reference) {
            resolve_colour(reference, defs, resolved, in_progress)?;
        }
    }

    let eval = ExprEvaluator::new(|n: &str| resolved.get(n).copied());
    let colour = eval.eval(expr)?;

    in_progress.remove(name);
    resolved.insert(name.to_string(), colour);

    Ok(colour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default_palette();
        assert_eq!(palette.get("black"), Some(Colour::BLACK));
        assert_eq!(palette.get("white"), Some(Colour::WHITE));
        assert!(palette.get("ink").is_some());
        assert!(!palette.is_empty());
    }

    #[test]
    fn test_get_strips_dollar_prefix() {
        let palette = Palette::default_palette();
        assert_eq!(palette.get("$black"), palette.get("black"));
    }

    #[test]
    fn test_builder_hex_definitions() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("ember", "#E25822").unwrap();
        builder.define("ash", "#888").unwrap();

        let palette = builder.build().unwrap();
        assert_eq!(palette.name, "test");
        assert_eq!(palette.get("ember"), Some(Colour::rgb(0xE2, 0x58, 0x22)));
        assert_eq!(palette.get("ash"), Some(Colour::rgb(0x88, 0x88, 0x88)));
    }

    #[test]
    fn test_builder_reference_resolution() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("base", "#102030").unwrap();
        builder.define("same", "$base").unwrap();

        let palette = builder.build().unwrap();
        assert_eq!(palette.get("same"), palette.get("base"));
    }

    #[test]
    fn test_builder_forward_reference() {
        // References can point at colours defined later in the file.
        let mut builder = PaletteBuilder::new("test");
        builder.define("alias", "$real").unwrap();
        builder.define("real", "#FF00FF").unwrap();

        let palette = builder.build().unwrap();
        assert_eq!(palette.get("alias"), Some(Colour::rgb(255, 0, 255)));
    }

    #[test]
    fn test_builder_expression_definition() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("gold", "#FFC828").unwrap();
        builder.define("shadow", "darken($gold, 30%)").unwrap();

        let palette = builder.build().unwrap();
        let gold = palette.get("gold").unwrap();
        let shadow = palette.get("shadow").unwrap();

        let sum = |c: Colour| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(sum(shadow) < sum(gold));
    }

    #[test]
    fn test_builder_cycle_detected() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("a", "$b").unwrap();
        builder.define("b", "$a").unwrap();

        assert!(builder.build().is_err());
    }

    #[test]
    fn test_builder_undefined_reference() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("a", "$missing").unwrap();

        assert!(builder.build().is_err());
    }

    #[test]
    fn test_variants() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("edge", "#000000").unwrap();
        builder.define("fill", "#FFFFFF").unwrap();
        builder.define_variant("inverted", "edge", "#FFFFFF").unwrap();
        builder.define_variant("inverted", "fill", "#000000").unwrap();

        let palette = builder.build().unwrap();

        assert!(palette.has_variant("inverted"));
        assert_eq!(palette.get("edge"), Some(Colour::BLACK));
        assert_eq!(
            palette.get_with_variant("edge", "inverted"),
            Some(Colour::WHITE)
        );
        // Unknown variant falls back to base
        assert_eq!(
            palette.get_with_variant("edge", "nonexistent"),
            Some(Colour::BLACK)
        );
    }

    #[test]
    fn test_variant_expression_uses_base_colours() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("accent", "#4080C0").unwrap();
        builder
            .define_variant("muted", "accent", "desaturate($accent, 100%)")
            .unwrap();

        let palette = builder.build().unwrap();
        let muted = palette.get_with_variant("accent", "muted").unwrap();
        assert_eq!(muted.r, muted.g);
        assert_eq!(muted.g, muted.b);
    }

    #[test]
    fn test_builder_len() {
        let mut builder = PaletteBuilder::new("test");
        assert!(builder.is_empty());
        builder.define("a", "#000").unwrap();
        assert_eq!(builder.len(), 1);
    }
}
