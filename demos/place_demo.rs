//! Tap-to-place walkthrough with a mock perception feed.
//!
//! A feed thread detects a floor, first as an estimate and then
//! confirmed with a growing extent, while the main thread taps the
//! screen and watches anchors appear in a mock renderer.
//!
//! Run with: cargo run --example place_demo
//! (set RUST_LOG=debug to watch the registry merge updates)

use std::f32::consts::FRAC_PI_2;
use std::thread;
use std::time::Duration;

use crossbeam_channel::unbounded;
use sthira_anchor::{
    CameraPose, Material, ObjectDescriptor, PlacementSession, PlaneExtent, Point3D, Pose3D,
    Quaternion, ScreenPoint, SessionConfig, StaticPoseSource, Surface, SurfaceEvent, SurfaceId,
    SurfaceKind, SurfaceState,
};

/// Camera 1.8m up, pitched straight down at the floor.
fn downward_camera() -> CameraPose {
    CameraPose::new(
        Pose3D::new(
            Point3D::new(0.0, 0.0, 1.8),
            Quaternion::from_axis_angle(Point3D::UNIT_Y, FRAC_PI_2),
        ),
        0,
    )
}

fn floor(state: SurfaceState, half: f32, timestamp_us: u64) -> Surface {
    Surface::full(
        SurfaceId::new(1),
        SurfaceKind::Horizontal,
        state,
        Pose3D::identity(),
        PlaneExtent::new(half, half),
        1,
        timestamp_us,
    )
}

fn main() -> sthira_anchor::Result<()> {
    env_logger::init();

    let session = PlacementSession::new(
        SessionConfig::default(),
        Box::new(StaticPoseSource::new(downward_camera())),
    );

    // Mock renderer: just narrates what it would draw
    session.subscribe_renderer(
        |anchor| {
            log::info!(
                "[Renderer] Draw {} ({}) at ({:.2}, {:.2}, {:.2})",
                anchor.id,
                anchor.object.mesh.name(),
                anchor.pose.position.x,
                anchor.pose.position.y,
                anchor.pose.position.z
            );
        },
        |id| {
            log::info!("[Renderer] Erase {}", id);
        },
    );

    let (tx, rx) = unbounded();
    let pump = session.spawn_feed_pump(rx)?;

    // Perception feed: estimate first, then confirm and refine
    let feed = thread::spawn(move || {
        tx.send(SurfaceEvent::Updated(floor(SurfaceState::Estimated, 0.4, 0)))
            .unwrap();
        thread::sleep(Duration::from_millis(30));
        tx.send(SurfaceEvent::Updated(floor(SurfaceState::Confirmed, 1.0, 30_000)))
            .unwrap();
        thread::sleep(Duration::from_millis(30));
        tx.send(SurfaceEvent::Updated(floor(SurfaceState::Confirmed, 1.6, 60_000)))
            .unwrap();
    });

    feed.join().expect("feed thread panicked");
    // Give the pump a moment to drain the channel
    thread::sleep(Duration::from_millis(50));

    // Center tap lands on the floor under the camera
    let placed = session.tap(ScreenPoint::center(), || {
        ObjectDescriptor::sphere(0.05, Material::metallic([0.0, 0.0, 1.0, 1.0]))
    })?;
    match placed {
        Some(id) => log::info!("Placed {} ({} anchors total)", id, session.anchor_count()),
        None => log::warn!("Center tap missed"),
    }

    // Corner tap deprojects past the confirmed extent and misses
    let missed = session.tap(ScreenPoint::new(0.0, 1.0), || {
        ObjectDescriptor::sphere(0.05, Material::matte([1.0, 0.0, 0.0, 1.0]))
    })?;
    if missed.is_none() {
        log::info!("Corner tap struck no surface, nothing placed");
    }

    if let Some(id) = placed {
        session.remove_anchor(id)?;
        log::info!("Removed {}", id);
    }

    pump.join().expect("feed pump panicked");
    log::info!(
        "Done: {} surfaces tracked, {} anchors left",
        session.surface_count(),
        session.anchor_count()
    );
    Ok(())
}
