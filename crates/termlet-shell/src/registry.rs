//! Command registry and line tokenizer.

use std::collections::HashMap;

use termlet_types::Result;

/// A registered command.
///
/// Handlers receive the already-tokenized arguments (command name
/// excluded) and return optional display text. Implemented for plain
/// closures, so `|args| Ok(Some(...))` registers directly.
pub trait CommandHandler {
    fn execute(&self, args: &[String]) -> Result<Option<String>>;
}

impl<F> CommandHandler for F
where
    F: Fn(&[String]) -> Result<Option<String>>,
{
    fn execute(&self, args: &[String]) -> Result<Option<String>> {
        self(args)
    }
}

/// Name -> handler and alias -> expansion maps.
///
/// All keys are stored lower-cased; lookups are case-insensitive. Nothing
/// here returns errors: re-registering replaces silently, removing an
/// absent entry is a no-op, and a failed lookup is `None`.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn CommandHandler>>,
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, name: &str, handler: impl CommandHandler + 'static) {
        log::debug!("registering command: {name}");
        self.commands.insert(name.to_lowercase(), Box::new(handler));
    }

    /// Remove a command by name. No-op if absent.
    pub fn unregister(&mut self, name: &str) {
        self.commands.remove(&name.to_lowercase());
    }

    /// Look up a handler, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.commands.get(&name.to_lowercase()).map(|h| h.as_ref())
    }

    /// Registered command names, sorted.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    // -- Alias API --

    /// Define an alias. Replaces any existing alias with the same name.
    pub fn register_alias(&mut self, alias: &str, expansion: &str) {
        self.aliases
            .insert(alias.to_lowercase(), expansion.to_string());
    }

    /// Remove an alias. No-op if absent.
    pub fn remove_alias(&mut self, alias: &str) {
        self.aliases.remove(&alias.to_lowercase());
    }

    /// All `(alias, expansion)` pairs, sorted by alias.
    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Expand an alias in the first token of `input`.
    ///
    /// The remainder after the first token is preserved byte-for-byte,
    /// leading whitespace included. Expansion is not recursive: an alias
    /// expanding to another alias name is left as-is.
    pub fn resolve_alias(&self, input: &str) -> String {
        let split = input
            .find(char::is_whitespace)
            .unwrap_or(input.len());
        let (first, rest) = input.split_at(split);
        match self.aliases.get(&first.to_lowercase()) {
            Some(expansion) => format!("{expansion}{rest}"),
            None => input.to_string(),
        }
    }
}

/// Tokenize a command line on whitespace, respecting quotes.
///
/// A `"` or `'` opens a quoted region closed only by the same character;
/// whitespace inside does not split, and the quote characters themselves
/// are stripped. An unterminated quote consumes the rest of the input as
/// a single token rather than raising an error.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                } else {
                    current.push(ch);
                }
            },
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                },
                c => current.push(c),
            },
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn echo(args: &[String]) -> Result<Option<String>> {
        Ok(Some(args.join(" ")))
    }

    #[test]
    fn register_and_lookup() {
        let mut reg = CommandRegistry::new();
        reg.register("echo", echo);
        let handler = reg.lookup("echo").expect("echo registered");
        let out = handler.execute(&["hi".into()]).unwrap();
        assert_eq!(out.as_deref(), Some("hi"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut reg = CommandRegistry::new();
        reg.register("Echo", echo);
        assert!(reg.lookup("ECHO").is_some());
        assert!(reg.lookup("echo").is_some());
    }

    #[test]
    fn lookup_miss_is_none() {
        let reg = CommandRegistry::new();
        assert!(reg.lookup("nope").is_none());
    }

    #[test]
    fn register_replaces_silently() {
        let mut reg = CommandRegistry::new();
        reg.register("x", |_: &[String]| -> Result<Option<String>> {
            Ok(Some("first".to_string()))
        });
        reg.register("x", |_: &[String]| -> Result<Option<String>> {
            Ok(Some("second".to_string()))
        });
        let out = reg.lookup("x").unwrap().execute(&[]).unwrap();
        assert_eq!(out.as_deref(), Some("second"));
        assert_eq!(reg.list_names().len(), 1);
    }

    #[test]
    fn unregister_absent_is_noop() {
        let mut reg = CommandRegistry::new();
        reg.unregister("ghost");
        reg.register("a", echo);
        reg.unregister("A");
        assert!(reg.lookup("a").is_none());
    }

    #[test]
    fn list_names_sorted() {
        let mut reg = CommandRegistry::new();
        reg.register("zeta", echo);
        reg.register("Alpha", echo);
        reg.register("mid", echo);
        assert_eq!(reg.list_names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn alias_resolves_first_token_only() {
        let mut reg = CommandRegistry::new();
        reg.register_alias("ll", "ls -la");
        assert_eq!(reg.resolve_alias("ll /tmp"), "ls -la /tmp");
        assert_eq!(reg.resolve_alias("echo ll"), "echo ll");
    }

    #[test]
    fn alias_preserves_remainder_exactly() {
        let mut reg = CommandRegistry::new();
        reg.register_alias("g", "greet");
        assert_eq!(reg.resolve_alias("g   spaced  args"), "greet   spaced  args");
    }

    #[test]
    fn alias_is_not_recursive() {
        let mut reg = CommandRegistry::new();
        reg.register_alias("a", "b");
        reg.register_alias("b", "echo hi");
        assert_eq!(reg.resolve_alias("a"), "b");
    }

    #[test]
    fn alias_case_insensitive() {
        let mut reg = CommandRegistry::new();
        reg.register_alias("Hi", "greet");
        assert_eq!(reg.resolve_alias("HI there"), "greet there");
    }

    #[test]
    fn unaliased_input_unchanged() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.resolve_alias("ls -la"), "ls -la");
    }

    #[test]
    fn remove_alias_works_and_tolerates_absent() {
        let mut reg = CommandRegistry::new();
        reg.register_alias("x", "y");
        reg.remove_alias("X");
        reg.remove_alias("x");
        assert_eq!(reg.resolve_alias("x"), "x");
    }

    #[test]
    fn tokenize_simple() {
        assert_eq!(tokenize("echo hello world"), vec!["echo", "hello", "world"]);
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  echo \t hi  "), vec!["echo", "hi"]);
    }

    #[test]
    fn tokenize_double_quotes() {
        assert_eq!(tokenize("echo \"hello world\""), vec!["echo", "hello world"]);
    }

    #[test]
    fn tokenize_single_quotes() {
        assert_eq!(tokenize("echo 'a b' c"), vec!["echo", "a b", "c"]);
    }

    #[test]
    fn tokenize_mixed_quote_kinds() {
        assert_eq!(tokenize("say \"it's\" here"), vec!["say", "it's", "here"]);
    }

    #[test]
    fn tokenize_unterminated_quote_is_single_token() {
        assert_eq!(tokenize("echo \"unfinished rest"), vec!["echo", "unfinished rest"]);
    }

    #[test]
    fn tokenize_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn tokenize_quotes_adjacent_to_text() {
        assert_eq!(tokenize("a\"b c\"d"), vec!["ab cd"]);
    }

    proptest! {
        #[test]
        fn tokenize_never_panics(input in ".*") {
            let _ = tokenize(&input);
        }

        #[test]
        fn tokenize_of_unquoted_words_round_trips(
            words in prop::collection::vec("[a-zA-Z0-9_./-]{1,10}", 1..8)
        ) {
            let line = words.join(" ");
            prop_assert_eq!(tokenize(&line), words);
        }
    }
}
