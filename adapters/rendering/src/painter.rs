use life_core::ChangeSet;

use crate::{
    Canvas, PixelRect, SurfaceDimensions, BACKGROUND_COLOR, CELL_PIXELS, GRID_LINE_COLOR,
    GRID_LINE_SPACING, LIVE_CELL_COLOR,
};

/// Paints one complete frame for `change_set` and presents it.
///
/// The background is filled white, every live cell becomes a black square at
/// [`CELL_PIXELS`] scale, and a light grey outline is stroked every
/// [`GRID_LINE_SPACING`] pixels across the whole surface.
pub fn paint<C>(canvas: &mut C, dimensions: SurfaceDimensions, change_set: &ChangeSet)
where
    C: Canvas + ?Sized,
{
    canvas.clear();
    canvas.fill_rect(dimensions.bounds(), BACKGROUND_COLOR);

    for cell in change_set.live_cells() {
        let rect = PixelRect::new(
            cell.column().saturating_mul(CELL_PIXELS),
            cell.row().saturating_mul(CELL_PIXELS),
            CELL_PIXELS,
            CELL_PIXELS,
        );
        canvas.fill_rect(rect, LIVE_CELL_COLOR);
    }

    for y in (0..dimensions.height()).step_by(GRID_LINE_SPACING as usize) {
        for x in (0..dimensions.width()).step_by(GRID_LINE_SPACING as usize) {
            let outline = PixelRect::new(x, y, GRID_LINE_SPACING, GRID_LINE_SPACING);
            canvas.stroke_rect(outline, GRID_LINE_COLOR);
        }
    }

    canvas.present();
}
