use crate::diagnostics::Diagnostics;
use crate::{Answers, ConditionGroup, Evaluator};

/// Where an item's visibility conditions come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionSource<'a> {
    /// Always visible.
    None,
    /// JSON text as stored with the form definition.
    Serialized(&'a str),
    Structured(&'a ConditionGroup),
}

/// A form screen, field or anything else whose visibility is gated by conditions.
pub trait Gated {
    fn conditions(&self) -> ConditionSource<'_>;
}

impl Gated for ConditionGroup {
    fn conditions(&self) -> ConditionSource<'_> {
        ConditionSource::Structured(self)
    }
}

impl<T: Gated> Gated for Option<T> {
    fn conditions(&self) -> ConditionSource<'_> {
        self.as_ref().map_or(ConditionSource::None, Gated::conditions)
    }
}

impl<T: Gated + ?Sized> Gated for &T {
    fn conditions(&self) -> ConditionSource<'_> {
        (**self).conditions()
    }
}

impl<D: Diagnostics> Evaluator<D> {
    /// Whether a single gated item is visible for these answers.
    #[must_use]
    pub fn is_visible<T: Gated + ?Sized>(&self, item: &T, answers: &Answers) -> bool {
        match item.conditions() {
            ConditionSource::None => true,
            ConditionSource::Serialized(text) => self.evaluate_serialized(Some(text), answers),
            ConditionSource::Structured(group) => self.evaluate_group(group, answers),
        }
    }

    /// Keep only the visible items, preserving order.
    ///
    /// Meant for the render pass over a screen's field list: each item is
    /// checked once, lazily.
    pub fn visible<'a, I>(
        &'a self,
        items: I,
        answers: &'a Answers,
    ) -> impl Iterator<Item = I::Item> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: Gated,
    {
        items
            .into_iter()
            .filter(move |item| self.is_visible(item, answers))
    }
}
