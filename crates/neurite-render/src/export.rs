//! Standalone HTML playback of a recorded animation (three.js from CDN).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use neurite_anim::MeshHandle;
use neurite_core::Result;
use neurite_math::Point3;
use serde::Serialize;

use crate::recording::Recording;
use crate::scene::{Scene, SceneNode};

/// Fallback when a node never received a material.
const DEFAULT_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

#[derive(Serialize)]
struct ExportNode<'a> {
    name: &'a str,
    color: [f32; 3],
    emissive: [f32; 3],
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: &'a [u32],
}

#[derive(Serialize)]
struct ExportLight<'a> {
    name: &'a str,
}

/// One recorded tick: camera eye, `[x, y, z, scale]` per node, on/off + position per light.
#[derive(Serialize)]
struct ExportFrame {
    camera: [f32; 3],
    nodes: Vec<[f32; 4]>,
    lights: Vec<(bool, [f32; 3])>,
}

#[derive(Serialize)]
struct ExportData<'a> {
    nodes: Vec<ExportNode<'a>>,
    lights: Vec<ExportLight<'a>>,
    frames: Vec<ExportFrame>,
    fov_degrees: f64,
}

fn to_f32(p: Point3) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}

fn flatten(points: &[Point3]) -> Vec<f32> {
    points.iter().flat_map(|&p| to_f32(p)).collect()
}

/// Make serialized JSON safe to embed in an inline `<script>` block.
///
/// `<` only occurs inside JSON strings, where `\u003c` decodes to the same
/// character; the line separators are valid JSON but not valid JS source.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

fn export_node(node: &SceneNode) -> ExportNode<'_> {
    let (color, emissive) = match &node.material {
        Some(material) => (material.diffuse, material.emissive),
        None => (DEFAULT_COLOR, [0.0; 3]),
    };
    ExportNode {
        name: &node.name,
        color,
        emissive,
        positions: flatten(&node.mesh.positions),
        normals: flatten(&node.mesh.normals),
        indices: &node.mesh.indices,
    }
}

impl Scene {
    fn export_data<'a>(&'a self, recording: &Recording) -> ExportData<'a> {
        let node_index: HashMap<MeshHandle, usize> =
            self.nodes.keys().enumerate().map(|(i, k)| (k, i)).collect();
        let light_index: HashMap<_, usize> =
            self.lights.keys().enumerate().map(|(i, k)| (k, i)).collect();

        let resting_nodes: Vec<[f32; 4]> = self
            .nodes
            .values()
            .map(|n| {
                let [x, y, z] = to_f32(n.position);
                [x, y, z, n.scale as f32]
            })
            .collect();
        let resting_lights: Vec<(bool, [f32; 3])> = self
            .lights
            .values()
            .map(|l| (l.enabled, to_f32(l.position)))
            .collect();

        let frames = recording
            .frames
            .iter()
            .map(|frame| {
                let mut nodes = resting_nodes.clone();
                for (handle, state) in &frame.nodes {
                    if let Some(&i) = node_index.get(handle) {
                        let [x, y, z] = to_f32(state.position);
                        nodes[i] = [x, y, z, state.scale as f32];
                    }
                }
                let mut lights = resting_lights.clone();
                for (handle, state) in &frame.lights {
                    if let Some(&i) = light_index.get(handle) {
                        lights[i] = (state.enabled, to_f32(state.position));
                    }
                }
                ExportFrame {
                    camera: to_f32(frame.camera),
                    nodes,
                    lights,
                }
            })
            .collect();

        ExportData {
            nodes: self.nodes.values().map(export_node).collect(),
            lights: self.lights.values().map(|l| ExportLight { name: &l.name }).collect(),
            frames,
            fov_degrees: self.camera.fov_y.to_degrees(),
        }
    }

    /// Write the playback page to `out`.
    pub fn write_html<W: Write>(&self, recording: &Recording, out: &mut W) -> Result<()> {
        let data = script_safe(&serde_json::to_string(&self.export_data(recording))?);

        write!(out, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Neurite</title>
    <style>
        body {{ margin: 0; overflow: hidden; background: #000; }}
        #info {{
            position: absolute; top: 10px; left: 10px;
            color: #ccc; font-family: sans-serif; font-size: 12px;
        }}
        #error {{
            position: absolute; top: 50%; left: 50%;
            transform: translate(-50%, -50%);
            background: rgba(200, 0, 0, 0.9); color: white;
            padding: 20px; border-radius: 5px; display: none;
        }}
    </style>
</head>
<body>
    <div id="info">Meshes: {} &middot; Triangles: {} &middot; Frames: {}</div>
    <div id="error">Sorry, your browser does not support 3D</div>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
    <script>
        const sceneData = {};
"#,
            self.nodes.len(),
            self.total_triangles(),
            recording.len(),
            data
        )?;

        write!(out, r#"
        function supports3d() {{
            try {{
                const canvas = document.createElement('canvas');
                return typeof THREE !== 'undefined' && !!(window.WebGLRenderingContext &&
                    (canvas.getContext('webgl') || canvas.getContext('experimental-webgl')));
            }} catch (e) {{
                return false;
            }}
        }}

        function start() {{
            const scene = new THREE.Scene();
            const camera = new THREE.PerspectiveCamera(
                sceneData.fov_degrees, window.innerWidth / window.innerHeight, 1, 10000);
            const renderer = new THREE.WebGLRenderer({{ antialias: true }});
            renderer.setSize(window.innerWidth, window.innerHeight);
            document.body.appendChild(renderer.domElement);
            scene.add(new THREE.AmbientLight(0x404040, 1));

            const meshes = sceneData.nodes.map(data => {{
                const geometry = new THREE.BufferGeometry();
                geometry.setAttribute('position', new THREE.Float32BufferAttribute(data.positions, 3));
                geometry.setAttribute('normal', new THREE.Float32BufferAttribute(data.normals, 3));
                geometry.setIndex(data.indices);
                const material = new THREE.MeshPhongMaterial({{
                    color: new THREE.Color(data.color[0], data.color[1], data.color[2]),
                    emissive: new THREE.Color(data.emissive[0], data.emissive[1], data.emissive[2]),
                    shininess: 30
                }});
                const mesh = new THREE.Mesh(geometry, material);
                mesh.name = data.name;
                scene.add(mesh);
                return mesh;
            }});

            const lights = sceneData.lights.map(data => {{
                const light = new THREE.PointLight(0xffffff, 1);
                light.name = data.name;
                scene.add(light);
                return light;
            }});

            function apply(frame) {{
                frame.nodes.forEach((t, i) => {{
                    meshes[i].position.set(t[0], t[1], t[2]);
                    meshes[i].scale.setScalar(t[3]);
                }});
                frame.lights.forEach((l, i) => {{
                    lights[i].visible = l[0];
                    lights[i].position.set(l[1][0], l[1][1], l[1][2]);
                }});
                camera.position.set(frame.camera[0], frame.camera[1], frame.camera[2]);
                camera.lookAt(0, 0, 0);
            }}

            window.addEventListener('resize', () => {{
                camera.aspect = window.innerWidth / window.innerHeight;
                camera.updateProjectionMatrix();
                renderer.setSize(window.innerWidth, window.innerHeight);
            }});

            let tick = 0;
            function animate() {{
                requestAnimationFrame(animate);
                if (sceneData.frames.length > 0) {{
                    apply(sceneData.frames[tick % sceneData.frames.length]);
                    tick++;
                }}
                renderer.render(scene, camera);
            }}
            animate();
        }}

        if (supports3d()) {{
            start();
        }} else {{
            document.getElementById('error').style.display = 'block';
        }}
    </script>
</body>
</html>
"#)?;
        Ok(())
    }

    /// Export scene and recording as a standalone HTML file.
    pub fn export_html(&self, recording: &Recording, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_html(recording, &mut out)?;
        out.flush()?;
        log::info!(
            "wrote {} ({} meshes, {} frames)",
            path.display(),
            self.nodes.len(),
            recording.len()
        );
        Ok(())
    }
}
