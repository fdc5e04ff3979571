use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, CanvasWindingRule, Document, HtmlCanvasElement, HtmlElement,
    PointerEvent, Window,
};

use scramble_core::{
    Board, DragController, FeatureCollection, Frame, GameConfig, GestureEnd, GestureStart, Point,
    Projector, SessionState,
};

mod constants;
mod export;
mod state;
mod utils;

use constants::{
    BASE_FILL, BASE_STROKE, DEFAULT_MAP, FRAME_STROKE, FRAME_STROKE_WIDTH, LABEL_FILL,
    LABEL_FONT_NARROW_PX, LABEL_FONT_PX, PIECE_FILL, PIECE_STROKE, PLACED_FILL, PLACED_STROKE,
    TIMER_TICK_MS, VIEWPORT_HEIGHT_SHARE,
};
use state::{State, STATE};
use utils::{
    asset_url, event_canvas_point, fetch_text_with_fallbacks, format_clock, get_query_param, log,
    set_fill_style, set_stroke_style,
};

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("board")
        .ok_or_else(|| JsValue::from_str("canvas #board not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// Size the canvas backing store from its CSS width and a fixed share of the
/// window height so the board keeps the page's aspect.
fn size_canvas(window: &Window, canvas: &HtmlCanvasElement) {
    let width = canvas
        .dyn_ref::<web_sys::Element>()
        .map(|el| el.get_bounding_client_rect().width())
        .filter(|w| *w > 0.0)
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0)
        * VIEWPORT_HEIGHT_SHARE;
    canvas.set_width(width.round().max(1.0) as u32);
    canvas.set_height(height.round().max(1.0) as u32);
}

fn trace_rings(ctx: &CanvasRenderingContext2d, rings: &[Vec<Point>], offset: (f64, f64)) {
    ctx.begin_path();
    for ring in rings {
        for (i, p) in ring.iter().enumerate() {
            let x = p.x + offset.0;
            let y = p.y + offset.1;
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.close_path();
    }
}

fn draw(state: &mut State) {
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    state.ctx.clear_rect(0.0, 0.0, w, h);

    // frame chrome renders even while the board is still loading
    let frame = state
        .board
        .as_ref()
        .map(|b| b.frame)
        .unwrap_or_else(|| Frame::from_viewport(state.config.frame_margin, w, h));
    state.ctx.set_line_width(FRAME_STROKE_WIDTH);
    set_stroke_style(&state.ctx, FRAME_STROKE);
    state
        .ctx
        .stroke_rect(frame.margin, frame.margin, frame.width, frame.height);

    let Some(board) = state.board.as_ref() else {
        return;
    };

    // resting outlines at the true positions
    for region in &board.regions {
        trace_rings(&state.ctx, region.rings(), (0.0, 0.0));
        set_fill_style(&state.ctx, BASE_FILL);
        state.ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
        state.ctx.set_line_width(1.0);
        set_stroke_style(&state.ctx, BASE_STROKE);
        state.ctx.stroke();
    }

    // labels at the centroids, under the pieces
    state
        .ctx
        .set_font(&format!("{}px sans-serif", state.label_font_px));
    state.ctx.set_text_align("center");
    state.ctx.set_text_baseline("middle");
    set_fill_style(&state.ctx, LABEL_FILL);
    for region in &board.regions {
        if region.name.is_empty() {
            continue;
        }
        if let Some(t) = region.target {
            let _ = state.ctx.fill_text(&region.name, t.x, t.y);
        }
    }

    // pieces wherever they currently sit; draw order is z-order
    for region in &board.regions {
        trace_rings(&state.ctx, region.rings(), region.offset());
        let (fill, stroke) = if region.placed {
            (PLACED_FILL, PLACED_STROKE)
        } else {
            (PIECE_FILL, PIECE_STROKE)
        };
        set_fill_style(&state.ctx, fill);
        state.ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
        state.ctx.set_line_width(1.0);
        set_stroke_style(&state.ctx, stroke);
        state.ctx.stroke();
    }
}

fn update_score_dom(state: &State) {
    if let Some(el) = state.document.get_element_by_id("score")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        el.set_inner_text(&format!(
            "{} / {}",
            state.session.placed(),
            state.session.total()
        ));
    }
}

fn update_timer_dom(state: &State) {
    if let Some(el) = state.document.get_element_by_id("timer")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        el.set_inner_text(&format_clock(state.session.elapsed_secs()));
    }
}

/// 1 Hz elapsed-time reporter. Armed exactly once, by the session's first
/// grab; elapsed seconds derive from the wall clock, not tick counting.
fn start_timer(state: Rc<RefCell<State>>) {
    let window = state.borrow().window.clone();
    state.borrow_mut().timer_start_ms = Some(js_sys::Date::now());
    let st = state.clone();
    let tick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let mut s = st.borrow_mut();
        let Some(start) = s.timer_start_ms else {
            return;
        };
        let secs = ((js_sys::Date::now() - start) / 1000.0).max(0.0) as u64;
        if s.session.set_elapsed(secs) {
            update_timer_dom(&s);
        }
    }));
    if let Err(e) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TIMER_TICK_MS,
    ) {
        log(&format!("timer setup failed: {e:?}"));
    }
    tick.forget();
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // Export PNG snapshot of the current board
    if let Some(btn) = doc.get_element_by_id("exportPng") {
        let btn: HtmlElement = btn.dyn_into().unwrap();
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Err(e) = export::export_png_snapshot(&st.borrow()) {
                log(&format!("export failed: {e:?}"));
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Pointer events: down/move on the canvas, up on the window so a release
    // outside the canvas still ends the gesture.
    {
        let st = state.clone();
        let pointerdown =
            Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
                let mut s = st.borrow_mut();
                let pt = event_canvas_point(&e, &s.canvas);
                let sref = &mut *s;
                let Some(board) = sref.board.as_mut() else {
                    return;
                };
                match sref.drag.press(board, &mut sref.session, pt) {
                    GestureStart::Grabbed { timer_started, .. } => {
                        draw(&mut s);
                        drop(s);
                        if timer_started {
                            start_timer(st.clone());
                        }
                    }
                    GestureStart::Ignored => {}
                }
            }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("pointerdown", pointerdown.as_ref().unchecked_ref())?;
        pointerdown.forget();
    }
    {
        let st = state.clone();
        let pointermove =
            Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
                let mut s = st.borrow_mut();
                if !s.drag.is_dragging() {
                    return;
                }
                let pt = event_canvas_point(&e, &s.canvas);
                let sref = &mut *s;
                let Some(board) = sref.board.as_mut() else {
                    return;
                };
                if sref.drag.drag(board, pt).is_some() {
                    draw(&mut s);
                }
            }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("pointermove", pointermove.as_ref().unchecked_ref())?;
        pointermove.forget();
    }
    {
        let st = state.clone();
        let pointerup =
            Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |_e: PointerEvent| {
                let mut s = st.borrow_mut();
                let sref = &mut *s;
                let Some(board) = sref.board.as_mut() else {
                    return;
                };
                let threshold = sref.snap_threshold;
                match sref.drag.release(board, &mut sref.session, threshold) {
                    GestureEnd::Placed { .. } => {
                        update_score_dom(&s);
                        draw(&mut s);
                    }
                    GestureEnd::Dropped { .. } => draw(&mut s),
                    GestureEnd::Ignored => {}
                }
            }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("pointerup", pointerup.as_ref().unchecked_ref())?;
        pointerup.forget();
    }

    Ok(())
}

async fn fetch_and_load_map(state: Rc<RefCell<State>>, name: &str) -> Result<(), JsValue> {
    let window = state.borrow().window.clone();
    let text = fetch_text_with_fallbacks(
        &window,
        &[
            &asset_url(&format!("maps/{name}.geojson")),
            &format!("/maps/{name}.geojson"),
            &format!("maps/{name}.geojson"),
        ],
    )
    .await
    .ok_or_else(|| JsValue::from_str("map fetch failed"))?;

    let collection =
        FeatureCollection::parse(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut s = state.borrow_mut();
    let width = s.canvas.width() as f64;
    let height = s.canvas.height() as f64;
    let projector = Projector::for_viewport(
        &s.config.projection,
        width,
        height,
        s.config.narrow_breakpoint,
    );
    let frame = Frame::from_viewport(s.config.frame_margin, width, height);
    let mut board = Board::from_features(&collection, &projector, frame, &s.config.name_property)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let seed = (js_sys::Date::now() as u64) as u32;
    board
        .scatter(seed, s.config.scatter_inset)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    s.session = SessionState::new(board.regions.len());
    s.board = Some(board);
    update_score_dom(&s);
    update_timer_dom(&s);
    draw(&mut s);
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;
    size_canvas(&window, &canvas);

    let config = GameConfig::default();
    let width = canvas.width() as f64;
    let snap_threshold = config.snap.threshold_for(width, config.narrow_breakpoint);
    let label_font_px = if width < config.narrow_breakpoint {
        LABEL_FONT_NARROW_PX
    } else {
        LABEL_FONT_PX
    };

    let map = window
        .location()
        .search()
        .ok()
        .and_then(|s| get_query_param(&s, "m"))
        .unwrap_or_else(|| DEFAULT_MAP.to_string());

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        ctx,
        config,
        board: None,
        session: SessionState::new(0),
        drag: DragController::new(),
        snap_threshold,
        label_font_px,
        timer_start_ms: None,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    attach_ui(state.clone())?;
    draw(&mut state.borrow_mut());

    let st = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = fetch_and_load_map(st, &map).await {
            // a failed load leaves the board empty; frame chrome still renders
            log(&format!("Failed to load map '{}': {:?}", map, err));
        }
    });
    Ok(())
}
