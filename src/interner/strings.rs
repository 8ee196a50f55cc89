use std::{collections::HashMap, fmt, rc::Rc};

/// An interned identifier or operator.
///
/// Equal text always yields the identical `Symbol` within one [`StringInterner`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

#[derive(Debug, Default)]
pub struct StringInterner {
    map: HashMap<Rc<str>, Symbol>,
    strings: Vec<Rc<str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner {
            map: HashMap::new(),
            strings: Vec::new(),
        }
    }

    /// Intern `text`, returning the existing symbol if it was seen before.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&symbol) = self.map.get(text) {
            return symbol;
        }

        let key: Rc<str> = Rc::from(text);
        let symbol = Symbol(self.strings.len() as u32);

        self.strings.push(Rc::clone(&key));
        self.map.insert(key, symbol);

        symbol
    }

    /// Look up a symbol without interning.
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.map.get(text).copied()
    }

    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
