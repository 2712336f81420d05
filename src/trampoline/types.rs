//! Continuation nodes for the trampoline

/// Thunk producing the next node of a chain
pub type Thunk<'a, T> = Box<dyn FnOnce() -> Bounce<'a, T> + 'a>;

/// One step of a reified recursive computation
pub enum Bounce<'a, T> {
    /// Terminal node holding the result
    Done(T),
    /// More work to do; calling the thunk never recurses into `run`
    Pending(Thunk<'a, T>),
}

impl<'a, T> Bounce<'a, T> {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Bounce::Done(_))
    }
}

/// Finish the chain with `result`
#[inline]
pub fn done<'a, T>(result: T) -> Bounce<'a, T> {
    Bounce::Done(result)
}

/// Defer the rest of the computation to `thunk`
#[inline]
pub fn pending<'a, T, F>(thunk: F) -> Bounce<'a, T>
where
    F: FnOnce() -> Bounce<'a, T> + 'a,
{
    Bounce::Pending(Box::new(thunk))
}
