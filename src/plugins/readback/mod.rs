//! Centre-pixel readback (render-only).
//!
//! ```text
//! Startup:        allocate a tiny odd-sized render target + a Readback on it
//! Added<Player>:  probe camera as a child of the rig (same pose, lens, clear colour)
//! render world:   probe renders the scene, texture is copied back every frame
//! observer:       ReadbackComplete -> middle texel -> FrameSample
//! ```
//!
//! The probe renders with the same lens as the main camera, so its middle texel is the centre
//! of the main view. The copy arrives asynchronously; hit resolution always sees the most
//! recently completed frame.

use bevy::asset::RenderAssetUsages;
use bevy::camera::RenderTarget;
use bevy::prelude::*;
use bevy::render::gpu_readback::{Readback, ReadbackComplete};
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::render::view::Msaa;

use crate::plugins::camera::view_lens;
use crate::plugins::player::Player;
use crate::plugins::shooting::FrameSample;

/// Probe target size in texels. Odd, so one texel sits exactly on the view centre.
pub const PROBE_SIZE: UVec2 = UVec2::new(3, 3);

const BYTES_PER_TEXEL: u32 = 4;

/// Row pitch alignment of GPU texture copies.
const ROW_ALIGNMENT: u32 = 256;

#[derive(Resource, Debug, Clone)]
pub struct CenterProbe {
    pub image: Handle<Image>,
}

#[derive(Component)]
pub struct ProbeCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, setup_probe)
        .add_systems(Update, attach_probe_camera);
}

pub fn probe_image() -> Image {
    let mut image = Image::new_fill(
        Extent3d {
            width: PROBE_SIZE.x,
            height: PROBE_SIZE.y,
            ..default()
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage |= TextureUsages::COPY_SRC | TextureUsages::RENDER_ATTACHMENT;
    image
}

fn setup_probe(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let image = images.add(probe_image());

    commands
        .spawn((Name::new("CenterReadback"), Readback::texture(image.clone())))
        .observe(store_center_texel);
    commands.insert_resource(CenterProbe { image });
}

fn attach_probe_camera(
    mut commands: Commands,
    probe: Option<Res<CenterProbe>>,
    q_new: Query<Entity, Added<Player>>,
) {
    let Some(probe) = probe else {
        return;
    };

    for rig in &q_new {
        commands.spawn((
            Name::new("CenterProbeCamera"),
            ProbeCamera,
            Camera3d::default(),
            // Render before the main camera.
            Camera { order: -1, ..default() },
            RenderTarget::Image(probe.image.clone().into()),
            view_lens(),
            Msaa::Off,
            Transform::default(),
            ChildOf(rig),
        ));
    }
}

/// Bytes between the starts of consecutive rows in a readback buffer.
///
/// Multi-row copies pad every row to the copy alignment. A single row is unpadded.
pub fn row_stride(size: UVec2) -> u32 {
    let row = size.x * BYTES_PER_TEXEL;
    if size.y > 1 {
        row.next_multiple_of(ROW_ALIGNMENT)
    } else {
        row
    }
}

/// Decode the middle texel of an sRGB RGBA8 readback.
pub fn center_texel(data: &[u8], size: UVec2) -> Option<LinearRgba> {
    let center = size / 2;
    let at = (center.y * row_stride(size) + center.x * BYTES_PER_TEXEL) as usize;
    let [r, g, b, a] = data.get(at..at + BYTES_PER_TEXEL as usize)? else {
        return None;
    };
    Some(Color::srgba_u8(*r, *g, *b, *a).to_linear())
}

pub fn store_center_texel(event: On<ReadbackComplete>, mut sample: ResMut<FrameSample>) {
    match center_texel(&event.data, PROBE_SIZE) {
        Some(center) => sample.center = center,
        None => warn!("Centre readback too short: {} bytes", event.data.len()),
    }
}
