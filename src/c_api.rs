use crate::{body::Body, simulation::Simulation, utils};

/// Per-body state handed to a native renderer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
    pub radius: f64,
    pub distance_to_primary: f64,
    pub color: [u8; 3],
    pub primary: bool,
}

impl From<&Body> for BodyState {
    fn from(body: &Body) -> Self {
        let (pos, vel) = (body.position(), body.velocity());
        Self {
            x: pos.x,
            y: pos.y,
            vx: vel.x,
            vy: vel.y,
            mass: body.mass(),
            radius: body.radius(),
            distance_to_primary: body.distance_to_primary(),
            color: body.color().0,
            primary: body.is_primary(),
        }
    }
}

/// Builds the inner solar system scenario. Returns null if it fails to validate.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn OrbitSim_CreateReference() -> *mut Simulation {
    match utils::solar_system().build() {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(_) => std::ptr::null_mut(),
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn OrbitSim_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Returns 0 on success, -1 for a null handle or a rejected step.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn OrbitSim_Step(handle: *mut Simulation) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => match sim.step() {
            Ok(()) => 0,
            Err(_) => -1,
        },
        None => -1,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn OrbitSim_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.len())
}

/// Writes the state of body `index` to `out`. Returns false if either pointer is
/// null or the index is out of range.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn OrbitSim_GetBodyState(
    handle: *const Simulation,
    index: usize,
    out: *mut BodyState,
) -> bool {
    let (Some(sim), Some(out)) = (unsafe { handle.as_ref() }, unsafe { out.as_mut() }) else {
        return false;
    };
    match sim.body(index) {
        Ok(body) => {
            *out = body.into();
            true
        }
        Err(_) => false,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn OrbitSim_GetTrailLength(handle: *const Simulation, index: usize) -> usize {
    unsafe { handle.as_ref() }
        .and_then(|sim| sim.body(index).ok())
        .map_or(0, |body| body.trail().len())
}

/// Copies up to `capacity` trail points of body `index`, oldest first, into
/// `out` as interleaved x/y pairs (`out` must hold `2 * capacity` doubles).
/// Returns the number of points written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn OrbitSim_CopyTrail(
    handle: *const Simulation,
    index: usize,
    out: *mut f64,
    capacity: usize,
) -> usize {
    if out.is_null() {
        return 0;
    }
    let Some(body) = unsafe { handle.as_ref() }.and_then(|sim| sim.body(index).ok()) else {
        return 0;
    };

    let out = unsafe { std::slice::from_raw_parts_mut(out, capacity * 2) };
    let mut written = 0;
    for (slot, point) in out.chunks_exact_mut(2).zip(body.trail().iter()) {
        slot[0] = point.x;
        slot[1] = point.y;
        written += 1;
    }
    written
}
