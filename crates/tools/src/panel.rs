use cubeview_common::Color;
use cubeview_scene::Mesh;

/// A numeric property of a mesh that the panel can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeField {
    PositionX,
    PositionY,
    PositionZ,
    Roughness,
    Metalness,
    DisplacementScale,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl CubeField {
    /// Current value of this field on `mesh`.
    pub fn get(self, mesh: &Mesh) -> f32 {
        let t = &mesh.transform;
        let m = &mesh.material;
        match self {
            Self::PositionX => t.position.x,
            Self::PositionY => t.position.y,
            Self::PositionZ => t.position.z,
            Self::Roughness => m.roughness,
            Self::Metalness => m.metalness,
            Self::DisplacementScale => m.displacement_scale,
            Self::ScaleX => t.scale.x,
            Self::ScaleY => t.scale.y,
            Self::ScaleZ => t.scale.z,
        }
    }

    /// Raw write, no range checks.
    pub fn set(self, mesh: &mut Mesh, value: f32) {
        let t = &mut mesh.transform;
        let m = &mut mesh.material;
        let slot = match self {
            Self::PositionX => &mut t.position.x,
            Self::PositionY => &mut t.position.y,
            Self::PositionZ => &mut t.position.z,
            Self::Roughness => &mut m.roughness,
            Self::Metalness => &mut m.metalness,
            Self::DisplacementScale => &mut m.displacement_scale,
            Self::ScaleX => &mut t.scale.x,
            Self::ScaleY => &mut t.scale.y,
            Self::ScaleZ => &mut t.scale.z,
        };
        *slot = value;
    }
}

/// Slider bound to one mesh field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberBinding {
    pub label: &'static str,
    pub field: CubeField,
    pub min: f32,
    pub max: f32,
    pub step: Option<f64>,
}

impl NumberBinding {
    fn new(label: &'static str, field: CubeField, min: f32, max: f32, step: Option<f64>) -> Self {
        Self {
            label,
            field,
            min,
            max,
            step,
        }
    }

    /// Clamp to `[min, max]` and snap to the step grid. NaN maps to `min`.
    pub fn sanitize(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        match self.step {
            Some(step) if step > 0.0 => {
                let snapped = ((f64::from(clamped) / step).round() * step) as f32;
                snapped.clamp(self.min, self.max)
            }
            _ => clamped,
        }
    }

    /// Sanitize `value` and write it to the mesh. Returns the stored value.
    /// NaN leaves the field untouched.
    pub fn apply(&self, mesh: &mut Mesh, value: f32) -> f32 {
        if value.is_nan() {
            return self.field.get(mesh);
        }
        let value = self.sanitize(value);
        self.field.set(mesh, value);
        value
    }
}

/// Collapsible group of controls.
#[derive(Debug, Clone)]
pub struct Folder {
    pub title: &'static str,
    pub open: bool,
    pub numbers: Vec<NumberBinding>,
    /// Show a picker bound to the material color after the sliders.
    pub material_color: bool,
}

/// One row of the panel, in display order.
#[derive(Debug, Clone)]
pub enum PanelEntry {
    Folder(Folder),
    /// Root-level color picker, outside any folder.
    RootColor,
}

/// Live editor for the cube's transform and material.
///
/// Writes go straight to the mesh; the renderer picks them up on its next
/// frame. The root-level color is seeded from the material once, at
/// construction, and afterwards only flows panel to material.
#[derive(Debug, Clone)]
pub struct DebugPanel {
    entries: Vec<PanelEntry>,
    color: Color,
}

impl DebugPanel {
    /// Panel seeded with the mesh's current material color.
    pub fn for_mesh(mesh: &Mesh) -> Self {
        Self::new(mesh.material.color)
    }

    /// Panel whose root-level color starts at `seed`.
    pub fn new(seed: Color) -> Self {
        use CubeField::*;

        let entries = vec![
            PanelEntry::Folder(Folder {
                title: "Position",
                open: true,
                numbers: vec![
                    NumberBinding::new("x", PositionX, -5.0, 101.0, None),
                    NumberBinding::new("y", PositionY, -5.0, 5.0, None),
                    NumberBinding::new("z", PositionZ, -5.0, 5.0, None),
                ],
                material_color: false,
            }),
            PanelEntry::Folder(Folder {
                title: "Material",
                open: true,
                numbers: vec![
                    NumberBinding::new("Roughness", Roughness, 0.0, 1.0, Some(0.001)),
                    NumberBinding::new("Metalness", Metalness, 0.0, 1.0, Some(0.001)),
                    NumberBinding::new(
                        "Displacement Scale",
                        DisplacementScale,
                        0.0,
                        1.0,
                        Some(0.001),
                    ),
                ],
                material_color: true,
            }),
            PanelEntry::RootColor,
            PanelEntry::Folder(Folder {
                title: "Scale",
                open: true,
                numbers: vec![
                    NumberBinding::new("X", ScaleX, 0.0, 10.0, Some(0.01)),
                    NumberBinding::new("Y", ScaleY, 0.0, 10.0, Some(0.01)),
                    NumberBinding::new("Z", ScaleZ, 0.0, 10.0, Some(0.01)),
                ],
                material_color: false,
            }),
        ];

        Self {
            entries,
            color: seed,
        }
    }

    /// Rows in display order.
    pub fn entries(&self) -> &[PanelEntry] {
        &self.entries
    }

    /// Folders in display order, skipping root-level rows.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.entries.iter().filter_map(|e| match e {
            PanelEntry::Folder(folder) => Some(folder),
            PanelEntry::RootColor => None,
        })
    }

    /// Slider bound to `field`, if the panel shows one.
    pub fn binding(&self, field: CubeField) -> Option<&NumberBinding> {
        self.folders()
            .flat_map(|f| &f.numbers)
            .find(|b| b.field == field)
    }

    /// Programmatic slider edit. Returns the stored value, or `None` if the
    /// field has no binding.
    pub fn set_number(&self, mesh: &mut Mesh, field: CubeField, value: f32) -> Option<f32> {
        let stored = self.binding(field)?.apply(mesh, value);
        tracing::debug!("panel: {field:?} = {stored}");
        Some(stored)
    }

    /// Material folder color edit.
    pub fn set_material_color(&self, mesh: &mut Mesh, color: Color) {
        tracing::debug!("panel: material color = {color}");
        mesh.material.color = color;
    }

    /// Root-level color parameter.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Root color edit. Also recolors the material.
    pub fn set_color(&mut self, mesh: &mut Mesh, color: Color) {
        self.color = color;
        self.set_material_color(mesh, color);
    }

    /// Draw the panel. Returns whether any control changed the mesh.
    pub fn show(&mut self, ctx: &egui::Context, mesh: &mut Mesh) -> bool {
        let mut changed = false;

        egui::Window::new("Controls")
            .default_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                let mut picked = None;
                for entry in &self.entries {
                    let folder = match entry {
                        PanelEntry::Folder(folder) => folder,
                        PanelEntry::RootColor => {
                            let mut root = self.color.to_srgb8();
                            ui.horizontal(|ui| {
                                ui.label("color");
                                if ui.color_edit_button_srgb(&mut root).changed() {
                                    picked = Some(Color::from_srgb8(root));
                                }
                            });
                            continue;
                        }
                    };
                    egui::CollapsingHeader::new(folder.title)
                        .default_open(folder.open)
                        .show(ui, |ui| {
                            for binding in &folder.numbers {
                                let mut value = binding.field.get(mesh);
                                let mut slider =
                                    egui::Slider::new(&mut value, binding.min..=binding.max)
                                        .text(binding.label);
                                if let Some(step) = binding.step {
                                    slider = slider.step_by(step);
                                }
                                if ui.add(slider).changed() {
                                    binding.apply(mesh, value);
                                    changed = true;
                                }
                            }
                            if folder.material_color {
                                let mut rgb = mesh.material.color.to_srgb8();
                                ui.horizontal(|ui| {
                                    ui.label("Color");
                                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                                        mesh.material.color = Color::from_srgb8(rgb);
                                        changed = true;
                                    }
                                });
                            }
                        });
                }
                if let Some(color) = picked {
                    self.set_color(mesh, color);
                    changed = true;
                }
            });

        changed
    }
}
