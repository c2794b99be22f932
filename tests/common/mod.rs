//! Fixture widgets used only by integration tests to exercise the
//! `Component`/`RenderObject` contracts end-to-end. Not part of the public API.
//!
//! `RenderObjectWidget::children` takes `&self` and returns owned
//! `Component`s, and `Component` is intentionally not `Clone` (an element
//! should never be duplicated). So these fixtures store the primitive data a
//! child needs and build a fresh `Component` from it on each `children()`
//! call, rather than storing a `Component` themselves.

use retained_tui::{
    Component, Constraints, ElementId, LayoutContext, PaintContext, Position, RenderObject, RenderObjectWidget, Size,
    Style, TerminalCanvas,
};

/// A single line of text, sized to its display width.
pub struct Text(pub String);

struct TextRenderObject {
    content: String,
    size: Size,
}

impl RenderObject for TextRenderObject {
    fn layout(&mut self, constraints: Constraints, _children: &[ElementId], _ctx: &mut dyn LayoutContext) -> Size {
        let width = retained_tui::width::string_width(&self.content) as u16;
        self.size = constraints.constrain(Size::new(width, 1));
        self.size
    }
    fn size(&self) -> Size {
        self.size
    }
    fn paint(&self, canvas: &mut TerminalCanvas, offset: Position, _children: &[ElementId], _ctx: &dyn PaintContext) {
        canvas.draw_text(offset, &self.content, Style::default());
    }
    fn uses_child_size(&self) -> bool {
        false
    }
}

impl RenderObjectWidget for Text {
    fn create_render_object(&self) -> Box<dyn RenderObject> {
        Box::new(TextRenderObject { content: self.0.clone(), size: Size::ZERO })
    }
    fn update_render_object(&self, render_object: &mut dyn RenderObject) {
        let _ = render_object;
    }
}

/// Centers a single line of text horizontally and vertically within the
/// (tight) constraints it's given.
pub struct CenterText(pub String);

struct CenterRenderObject {
    size: Size,
}

impl RenderObject for CenterRenderObject {
    fn layout(&mut self, constraints: Constraints, children: &[ElementId], ctx: &mut dyn LayoutContext) -> Size {
        self.size = constraints.constrain(Size::new(constraints.max_width, constraints.max_height));
        if let Some(&child) = children.first() {
            let child_size = ctx.layout_child(child, Constraints::loose(self.size));
            let offset_x = self.size.width.saturating_sub(child_size.width) / 2;
            let offset_y = self.size.height.saturating_sub(child_size.height) / 2;
            ctx.set_child_offset(child, Position::new(offset_x, offset_y));
        }
        self.size
    }
    fn size(&self) -> Size {
        self.size
    }
    fn paint(&self, canvas: &mut TerminalCanvas, offset: Position, children: &[ElementId], ctx: &dyn PaintContext) {
        if let Some(&child) = children.first() {
            let child_offset = ctx.child_offset(child);
            ctx.paint_child(child, canvas, offset.translate(child_offset.x, child_offset.y));
        }
    }
}

impl RenderObjectWidget for CenterText {
    fn create_render_object(&self) -> Box<dyn RenderObject> {
        Box::new(CenterRenderObject { size: Size::ZERO })
    }
    fn update_render_object(&self, render_object: &mut dyn RenderObject) {
        let _ = render_object;
    }
    fn children(&self) -> Vec<Component> {
        vec![Component::RenderObject(Box::new(Text(self.0.clone())))]
    }
}

/// How children are aligned along a [`ColumnOfTexts`]'s cross (horizontal) axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    /// Flush to column 0.
    Start,
    /// Centered within the column's width.
    Center,
    /// Flush to the right edge.
    End,
}

/// Stacks a fixed list of text lines vertically, one row per line, at the
/// width it's given.
pub struct ColumnOfTexts {
    pub items: Vec<String>,
    pub cross_axis_alignment: CrossAxisAlignment,
}

struct ColumnRenderObject {
    cross_axis_alignment: CrossAxisAlignment,
    size: Size,
}

impl RenderObject for ColumnRenderObject {
    fn layout(&mut self, constraints: Constraints, children: &[ElementId], ctx: &mut dyn LayoutContext) -> Size {
        let width = constraints.max_width;
        let mut y = 0u16;
        for &child in children {
            let child_size = ctx.layout_child(child, Constraints::loose(Size::new(width, constraints.max_height)));
            let offset_x = match self.cross_axis_alignment {
                CrossAxisAlignment::Start => 0,
                CrossAxisAlignment::Center => width.saturating_sub(child_size.width) / 2,
                CrossAxisAlignment::End => width.saturating_sub(child_size.width),
            };
            ctx.set_child_offset(child, Position::new(offset_x, y));
            y = y.saturating_add(child_size.height);
        }
        self.size = constraints.constrain(Size::new(width, y));
        self.size
    }
    fn size(&self) -> Size {
        self.size
    }
    fn paint(&self, canvas: &mut TerminalCanvas, offset: Position, children: &[ElementId], ctx: &dyn PaintContext) {
        for &child in children {
            let child_offset = ctx.child_offset(child);
            ctx.paint_child(child, canvas, offset.translate(child_offset.x, child_offset.y));
        }
    }
}

impl RenderObjectWidget for ColumnOfTexts {
    fn create_render_object(&self) -> Box<dyn RenderObject> {
        Box::new(ColumnRenderObject { cross_axis_alignment: self.cross_axis_alignment, size: Size::ZERO })
    }
    fn update_render_object(&self, render_object: &mut dyn RenderObject) {
        let _ = render_object;
    }
    fn children(&self) -> Vec<Component> {
        self.items.iter().map(|s| Component::RenderObject(Box::new(Text(s.clone())) as Box<dyn RenderObjectWidget>)).collect()
    }
}
