//! Grammar context threaded through every parse function.
//!
//! A `Context` is passed by value. Callees derive child contexts with
//! [`Context::with`] and [`Context::without`], so nothing a callee does can
//! change the caller's context.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Context: u32 {
        const NONE = 0;
        const STRICT = 1 << 0;
        const MODULE = 1 << 1;
        /// `return` is allowed.
        const IN_FUNCTION = 1 << 2;
        /// `yield` is an operator.
        const IN_GENERATOR = 1 << 3;
        /// `await` is an operator.
        const IN_ASYNC = 1 << 4;
        const IN_ITERATION = 1 << 5;
        const IN_SWITCH = 1 << 6;
        /// The `in` operator is not consumed, as in a `for` head.
        const DISALLOW_IN = 1 << 7;
        /// `super.x` is allowed.
        const IN_METHOD = 1 << 8;
        /// `super()` is allowed.
        const IN_DERIVED_CONSTRUCTOR = 1 << 9;
        /// Class field initializer or static block; `arguments` is an error.
        const IN_CLASS_FIELD = 1 << 10;
        /// `await` may not be used as an identifier.
        const IN_STATIC_BLOCK = 1 << 11;
        /// Formal parameters; `yield` and `await` expressions are errors.
        const IN_PARAMETERS = 1 << 12;
        const NEW_TARGET = 1 << 13;
        /// Module top level, where `import` and `export` declarations live.
        const TOP_LEVEL = 1 << 14;

        /// Flags that do not survive entering any function.
        const FUNCTION_RESET = Self::IN_GENERATOR.bits()
            | Self::IN_ASYNC.bits()
            | Self::IN_ITERATION.bits()
            | Self::IN_SWITCH.bits()
            | Self::DISALLOW_IN.bits()
            | Self::IN_PARAMETERS.bits()
            | Self::IN_STATIC_BLOCK.bits()
            | Self::TOP_LEVEL.bits();
        /// Flags an ordinary function also drops; arrows inherit them.
        const THIS_BOUND = Self::IN_METHOD.bits()
            | Self::IN_DERIVED_CONSTRUCTOR.bits()
            | Self::IN_CLASS_FIELD.bits();
    }
}

impl Context {
    #[inline]
    pub fn with(self, flags: Context) -> Context {
        self | flags
    }

    #[inline]
    pub fn without(self, flags: Context) -> Context {
        self - flags
    }

    #[inline]
    pub fn is_strict(self) -> bool {
        self.contains(Context::STRICT)
    }

    #[inline]
    pub fn is_module(self) -> bool {
        self.contains(Context::MODULE)
    }

    #[inline]
    pub fn in_generator(self) -> bool {
        self.contains(Context::IN_GENERATOR)
    }

    #[inline]
    pub fn in_async(self) -> bool {
        self.contains(Context::IN_ASYNC)
    }

    #[inline]
    pub fn in_parameters(self) -> bool {
        self.contains(Context::IN_PARAMETERS)
    }

    #[inline]
    pub fn allows_in(self) -> bool {
        !self.contains(Context::DISALLOW_IN)
    }

    /// `await` is reserved: module code, async functions and static blocks.
    #[inline]
    pub fn await_is_reserved(self) -> bool {
        self.intersects(Context::MODULE | Context::IN_ASYNC | Context::IN_STATIC_BLOCK)
    }

    /// `yield` is reserved: strict code and generators.
    #[inline]
    pub fn yield_is_reserved(self) -> bool {
        self.intersects(Context::STRICT | Context::IN_GENERATOR)
    }

    /// Context for the parameters and body of a non-arrow function.
    pub fn enter_function(self, is_async: bool, is_generator: bool) -> Context {
        let mut ctx = self
            .without(Context::FUNCTION_RESET | Context::THIS_BOUND)
            .with(Context::IN_FUNCTION | Context::NEW_TARGET);
        ctx.set(Context::IN_ASYNC, is_async);
        ctx.set(Context::IN_GENERATOR, is_generator);
        ctx
    }

    /// Context for the parameters and body of an arrow function, which keeps
    /// the enclosing `this`, `super` and `new.target`.
    pub fn enter_arrow(self, is_async: bool) -> Context {
        let mut ctx = self.without(Context::FUNCTION_RESET).with(Context::IN_FUNCTION);
        ctx.set(Context::IN_ASYNC, is_async);
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_function_resets_loop_and_generator_state() {
        let outer = Context::STRICT | Context::IN_ITERATION | Context::IN_GENERATOR | Context::IN_METHOD;
        let inner = outer.enter_function(true, false);
        assert!(inner.is_strict());
        assert!(inner.in_async());
        assert!(!inner.in_generator());
        assert!(!inner.contains(Context::IN_ITERATION));
        assert!(!inner.contains(Context::IN_METHOD));
        assert!(inner.contains(Context::NEW_TARGET));
    }

    #[test]
    fn test_arrow_keeps_super_and_new_target() {
        let outer = Context::IN_METHOD | Context::NEW_TARGET | Context::IN_ASYNC | Context::DISALLOW_IN;
        let inner = outer.enter_arrow(false);
        assert!(inner.contains(Context::IN_METHOD | Context::NEW_TARGET));
        assert!(!inner.in_async());
        assert!(inner.allows_in());
    }

    #[test]
    fn test_child_context_leaves_parent_untouched() {
        let parent = Context::MODULE | Context::STRICT;
        let child = parent.with(Context::DISALLOW_IN);
        assert!(parent.allows_in());
        assert!(!child.allows_in());
        assert_eq!(child.without(Context::DISALLOW_IN), parent);
    }
}
