use geomirror::math::{Vector3, Vector4};
use geomirror::scene::{RemoteScene, SceneError};
use geomirror::{GeomDesc, GeomKind, Pose, SceneMirror};
use serde_json::Value;
use std::io::{BufRead, BufReader};
use std::net::TcpListener;
use std::thread;

#[test]
fn mirror_streams_commands_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    let viewer = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        BufReader::new(stream)
            .lines()
            .map(|line| serde_json::from_str::<Value>(&line.unwrap()).unwrap())
            .collect::<Vec<_>>()
    });

    let model = vec![GeomDesc::new(
        "can",
        GeomKind::Cylinder,
        Vector3::new(0.05, 0.1, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 1.0),
    )];
    let mut poses = vec![Pose::identity()];

    let scene = RemoteScene::connect(address).unwrap();
    let mut mirror = SceneMirror::new(scene, &model, &poses).unwrap();
    poses[0] = Pose::at(Vector3::new(0.0, 0.0, 2.0));
    mirror.render(&poses).unwrap();
    assert_eq!(mirror.scene().sent(), 4);
    drop(mirror);

    let commands = viewer.join().unwrap();
    let kinds: Vec<_> = commands.iter().map(|c| c["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["delete", "set_object", "set_transform", "set_transform"]);

    let object = &commands[1]["object"];
    assert_eq!(object["metadata"]["type"], "Object");
    assert_eq!(object["geometries"][0]["type"], "CylinderGeometry");
    assert_eq!(object["geometries"][0]["height"], 0.2);
    assert_eq!(object["materials"][0]["color"], 0x0000FF);
    assert_eq!(object["object"]["geometry"], object["geometries"][0]["uuid"]);

    let matrix = commands[3]["matrix"].as_array().unwrap();
    assert_eq!(matrix[14], 2.0);
}

#[test]
fn unreachable_viewer_is_a_connect_error() {
    // bind then drop to get a port nobody listens on
    let address = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    assert!(matches!(
        RemoteScene::connect(address),
        Err(SceneError::Connect { .. })
    ));
}
