//! Band primitives and the synchronized band sweep behind the Boolean
//! operators.
//!
//! The output sequence is built by appending one band at a time. Every
//! emission goes through [`organize_band`], which merges horizontally
//! touching spans, and [`coalesce_bands`], which extends the previously
//! emitted band downward when the new band repeats its spans. Together they
//! keep the sequence canonical without a separate normalization pass.

use crate::{coord::Coord, rect::Rect};
use smallvec::SmallVec;

/// A transient reference to a band of the output sequence, as a half-open
/// index range.
///
/// Appending to the sequence invalidates any older [`BandRef`]; the value
/// returned by the latest emission always denotes the current tail.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct BandRef {
    start: usize,
    end: usize,
}

impl BandRef {
    fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Horizontal spans produced by a band combiner before emission.
type Spans<C> = SmallVec<[(C, C); 8]>;

/// The Boolean operator driving a band sweep.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SweepOp {
    Union,
    Subtract,
    Xor,
    Intersect,
}

impl SweepOp {
    /// Returns `true` if slabs covered by the left input alone are emitted.
    /// The same policy decides whether a left tail is drained.
    fn emits_left(self) -> bool {
        matches!(self, Self::Union | Self::Subtract | Self::Xor)
    }

    /// Returns `true` if slabs covered by the right input alone are emitted,
    /// and likewise whether a right tail is drained.
    fn emits_right(self) -> bool {
        matches!(self, Self::Union | Self::Xor)
    }
}

/// Returns the index one past the end of the band starting at `start`.
pub(crate) fn band_end<C: Coord>(rects: &[Rect<C>], start: usize) -> usize {
    let top = rects[start].top();
    let mut end = start + 1;
    while end < rects.len() && rects[end].top() == top {
        end += 1;
    }
    end
}

/// Re-emits the spans of `band` with the vertical extent `top..bottom` and
/// coalesces the result with the previously emitted band.
pub(crate) fn emit_band<C: Coord>(
    out: &mut Vec<Rect<C>>,
    band: &[Rect<C>],
    top: C,
    bottom: C,
    previous: BandRef,
) -> BandRef {
    organize_band(
        out,
        band.iter().map(|r| (r.left(), r.right())),
        top,
        bottom,
        previous,
    )
}

/// Emits `spans` as a band spanning `top..bottom`, merging spans that touch,
/// and coalesces the band with the previously emitted one when possible.
pub(crate) fn organize_band<C: Coord>(
    out: &mut Vec<Rect<C>>,
    spans: impl IntoIterator<Item = (C, C)>,
    top: C,
    bottom: C,
    previous: BandRef,
) -> BandRef {
    let start = out.len();
    for (left, right) in spans {
        debug_assert!(left < right);
        if out.len() > start {
            let last = out.len() - 1;
            if out[last].right() == left {
                out[last] = Rect::from_edges(out[last].left(), top, right, bottom);
                continue;
            }
        }
        out.push(Rect::from_edges(left, top, right, bottom));
    }
    coalesce_bands(
        out,
        previous,
        BandRef {
            start,
            end: out.len(),
        },
    )
}

/// Extends `previous` down over `current` if the two bands are vertically
/// adjacent and consist of the same horizontal spans; otherwise leaves both
/// in place. Returns the band that is now the tail of the sequence.
fn coalesce_bands<C: Coord>(out: &mut Vec<Rect<C>>, previous: BandRef, current: BandRef) -> BandRef {
    if current.is_empty() {
        return previous;
    }
    if previous.is_empty() || previous.end != current.start {
        return current;
    }
    if current.end - current.start != previous.end - previous.start {
        return current;
    }
    if out[previous.start].bottom() != out[current.start].top() {
        return current;
    }
    for i in 0..current.end - current.start {
        let p = &out[previous.start + i];
        let c = &out[current.start + i];
        if p.left() != c.left() || p.right() != c.right() {
            return current;
        }
    }
    let bottom = out[current.start].bottom();
    for i in previous.start..previous.end {
        out[i] = Rect::from_edges(out[i].left(), out[i].top(), out[i].right(), bottom);
    }
    out.truncate(current.start);
    previous
}

/// Runs the synchronized band sweep of `op` over two canonical sequences and
/// returns the canonical result sequence.
pub(crate) fn sweep<C: Coord>(left: &[Rect<C>], right: &[Rect<C>], op: SweepOp) -> Vec<Rect<C>> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut previous = BandRef::default();
    let mut li = 0;
    let mut ri = 0;
    // Tops of the unconsumed parts of the current bands. A band keeps
    // participating in slabs until the sweep line reaches its bottom.
    let mut l_top = left.first().map_or(C::ZERO, |r| r.top());
    let mut r_top = right.first().map_or(C::ZERO, |r| r.top());

    while li < left.len() && ri < right.len() {
        let l_end = band_end(left, li);
        let r_end = band_end(right, ri);
        let l_bot = left[li].bottom();
        let r_bot = right[ri].bottom();

        // A band that lies entirely above the other side's frontier forms a
        // slab on its own.
        if l_bot <= r_top {
            if op.emits_left() {
                previous = emit_band(&mut out, &left[li..l_end], l_top, l_bot, previous);
            }
            li = l_end;
            if li < left.len() {
                l_top = left[li].top();
            }
            continue;
        }
        if r_bot <= l_top {
            if op.emits_right() {
                previous = emit_band(&mut out, &right[ri..r_end], r_top, r_bot, previous);
            }
            ri = r_end;
            if ri < right.len() {
                r_top = right[ri].top();
            }
            continue;
        }

        // The bands overlap vertically. Emit the upper one-sided part, if any.
        if l_top < r_top {
            if op.emits_left() {
                previous = emit_band(&mut out, &left[li..l_end], l_top, r_top, previous);
            }
            l_top = r_top;
        } else if r_top < l_top {
            if op.emits_right() {
                previous = emit_band(&mut out, &right[ri..r_end], r_top, l_top, previous);
            }
            r_top = l_top;
        }

        let top = l_top;
        let bottom = l_bot.min(r_bot);
        previous = combine_bands(
            op,
            &mut out,
            &left[li..l_end],
            &right[ri..r_end],
            top,
            bottom,
            previous,
        );
        if l_bot == bottom {
            li = l_end;
            if li < left.len() {
                l_top = left[li].top();
            }
        } else {
            l_top = bottom;
        }
        if r_bot == bottom {
            ri = r_end;
            if ri < right.len() {
                r_top = right[ri].top();
            }
        } else {
            r_top = bottom;
        }
    }

    if op.emits_left() && li < left.len() {
        drain(&mut out, left, li, l_top, previous);
    } else if op.emits_right() && ri < right.len() {
        drain(&mut out, right, ri, r_top, previous);
    }
    out
}

/// Copies the remaining bands of `rects` into the output. Only the first band
/// can coalesce with the previously emitted one; the rest of a canonical
/// sequence is appended as is.
fn drain<C: Coord>(out: &mut Vec<Rect<C>>, rects: &[Rect<C>], start: usize, top: C, previous: BandRef) {
    let end = band_end(rects, start);
    emit_band(out, &rects[start..end], top, rects[start].bottom(), previous);
    out.extend_from_slice(&rects[end..]);
}

/// Runs the per-operator span combiner over two sliced bands and emits the
/// result as a band spanning `top..bottom`.
fn combine_bands<C: Coord>(
    op: SweepOp,
    out: &mut Vec<Rect<C>>,
    left: &[Rect<C>],
    right: &[Rect<C>],
    top: C,
    bottom: C,
    previous: BandRef,
) -> BandRef {
    let mut spans = Spans::new();
    match op {
        SweepOp::Union => merge_spans(left, right, &mut spans),
        SweepOp::Subtract => subtract_spans(left, right, &mut spans),
        SweepOp::Xor => xor_spans(left, right, &mut spans),
        SweepOp::Intersect => intersect_spans(left, right, &mut spans),
    }
    organize_band(out, spans, top, bottom, previous)
}

/// Produces the union of the two sorted span lists, fusing spans that overlap
/// or touch.
fn merge_spans<C: Coord>(a: &[Rect<C>], b: &[Rect<C>], out: &mut Spans<C>) {
    let mut i = 0;
    let mut j = 0;
    let mut current: Option<(C, C)> = None;
    while i < a.len() || j < b.len() {
        let next = if j >= b.len() || (i < a.len() && a[i].left() <= b[j].left()) {
            let span = (a[i].left(), a[i].right());
            i += 1;
            span
        } else {
            let span = (b[j].left(), b[j].right());
            j += 1;
            span
        };
        current = match current {
            Some((left, right)) if next.0 <= right => Some((left, right.max(next.1))),
            Some(span) => {
                out.push(span);
                Some(next)
            }
            None => Some(next),
        };
    }
    if let Some(span) = current {
        out.push(span);
    }
}

/// Produces the geometric meet of every overlapping pair of spans.
fn intersect_spans<C: Coord>(a: &[Rect<C>], b: &[Rect<C>], out: &mut Spans<C>) {
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        let left = a[i].left().max(b[j].left());
        let right = a[i].right().min(b[j].right());
        if left < right {
            out.push((left, right));
        }
        if a[i].right() <= b[j].right() {
            i += 1;
        } else {
            j += 1;
        }
    }
}

/// Subtracts the spans of `b` from the spans of `a`, left to right.
fn subtract_spans<C: Coord>(a: &[Rect<C>], b: &[Rect<C>], out: &mut Spans<C>) {
    let mut j = 0;
    for r in a {
        let mut left = r.left();
        let right = r.right();
        while j < b.len() && b[j].right() <= left {
            j += 1;
        }
        let mut k = j;
        while left < right && k < b.len() && b[k].left() < right {
            if b[k].left() > left {
                out.push((left, b[k].left()));
            }
            left = left.max(b[k].right());
            k += 1;
        }
        if left < right {
            out.push((left, right));
        }
    }
}

/// Produces the symmetric difference as `(a ∖ b) ∪ (b ∖ a)`.
///
/// The two differences are disjoint, so interleaving them by their left edges
/// is enough; the seam where coverage flips sides touches and is fused by
/// [`organize_band`].
fn xor_spans<C: Coord>(a: &[Rect<C>], b: &[Rect<C>], out: &mut Spans<C>) {
    let mut ab = Spans::new();
    let mut ba = Spans::new();
    subtract_spans(a, b, &mut ab);
    subtract_spans(b, a, &mut ba);

    let mut i = 0;
    let mut j = 0;
    while i < ab.len() && j < ba.len() {
        if ab[i].0 <= ba[j].0 {
            out.push(ab[i]);
            i += 1;
        } else {
            out.push(ba[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&ab[i..]);
    out.extend_from_slice(&ba[j..]);
}
