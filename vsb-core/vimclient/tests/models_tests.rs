//! 数据模型与错误类型测试

use vsb_vimclient::*;

#[test]
fn test_object_refs_are_distinct_types() {
    let vm = VmRef::new("vm-100");
    let folder = FolderRef::new("group-v1");

    assert_eq!(vm.id(), "vm-100");
    assert_eq!(folder.id(), "group-v1");
    assert_eq!(vm.to_string(), "vm-100");
}

#[test]
fn test_object_ref_serializes_as_plain_id() {
    let vm = VmRef::new("vm-42");
    let json = serde_json::to_string(&vm).unwrap();
    assert_eq!(json, r#""vm-42""#);

    let parsed: VmRef = serde_json::from_str(r#""vm-42""#).unwrap();
    assert_eq!(parsed, vm);
}

#[test]
fn test_power_state_wire_format() {
    assert_eq!(
        serde_json::to_string(&PowerState::PoweredOn).unwrap(),
        r#""poweredOn""#
    );
    assert_eq!(
        serde_json::to_string(&PowerState::PoweredOff).unwrap(),
        r#""poweredOff""#
    );
    assert_eq!(
        serde_json::to_string(&PowerState::Suspended).unwrap(),
        r#""suspended""#
    );

    let state: PowerState = serde_json::from_str(r#""poweredOff""#).unwrap();
    assert_eq!(state, PowerState::PoweredOff);
    assert_eq!(state.as_str(), "poweredOff");
}

#[test]
fn test_relocate_spec_minimal() {
    let spec = RelocateSpec::new(PoolRef::new("pool-1"));
    let value = serde_json::to_value(&spec).unwrap();

    assert_eq!(value["pool"], "pool-1");
    // 未设置的字段不应出现在请求中
    assert!(value.get("datastore").is_none());
    assert!(value.get("diskMoveType").is_none());
}

#[test]
fn test_relocate_spec_linked_clone() {
    let spec = RelocateSpec::new(PoolRef::new("pool-1"))
        .with_datastore(DatastoreRef::new("datastore-7"))
        .with_child_disk_backing();

    assert_eq!(spec.disk_move_type.as_deref(), Some(DISK_MOVE_CHILD));

    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(value["datastore"], "datastore-7");
    assert_eq!(value["diskMoveType"], "createNewChildDiskBacking");
}

#[test]
fn test_clone_spec_defaults_to_powered_off() {
    let spec = CloneSpec::new(RelocateSpec::new(PoolRef::new("pool-1")));

    assert!(!spec.power_on);
    assert!(spec.snapshot.is_none());

    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(value["powerOn"], false);
    assert!(value.get("snapshot").is_none());
}

#[test]
fn test_clone_spec_with_snapshot() {
    let spec = CloneSpec::new(RelocateSpec::new(PoolRef::new("pool-1")))
        .with_snapshot(SnapshotRef::new("snapshot-5"));

    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(value["snapshot"], "snapshot-5");
}

#[test]
fn test_hardware_spec_builder() {
    let spec = HardwareSpec::new()
        .with_cpus(4)
        .with_memory_mb(8192)
        .with_cpu_limit(-1)
        .with_memory_reservation_locked(true);

    assert_eq!(spec.num_cpus, Some(4));
    assert_eq!(spec.memory_mb, Some(8192));
    assert_eq!(spec.cpu_limit_mhz, Some(-1));
    assert_eq!(spec.memory_reservation_locked_to_max, Some(true));
    assert!(spec.cpu_reservation_mhz.is_none());
}

#[test]
fn test_hardware_spec_omits_absent_fields() {
    let spec = HardwareSpec::new().with_cpus(2);
    let value = serde_json::to_value(&spec).unwrap();

    assert_eq!(value["numCpus"], 2);
    assert!(value.get("memoryMb").is_none());
    assert!(value.get("cpuReservationMhz").is_none());
    assert!(value.get("memoryReservationLockedToMax").is_none());
}

#[test]
fn test_snapshot_request_defaults() {
    let request = SnapshotRequest::new("base", "构建基线");

    assert_eq!(request.name, "base");
    assert_eq!(request.description, "构建基线");
    assert!(!request.memory);
    assert!(!request.quiesce);
}

#[test]
fn test_task_state_terminal() {
    assert!(TaskState::Success.is_terminal());
    assert!(TaskState::Error.is_terminal());
    assert!(!TaskState::Queued.is_terminal());
    assert!(!TaskState::Running.is_terminal());
}

#[test]
fn test_task_info_deserialize() {
    let json = r#"{
        "task": "task-123",
        "state": "success",
        "result": "vm-200"
    }"#;

    let info: TaskInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.task.id(), "task-123");
    assert_eq!(info.state, TaskState::Success);
    assert_eq!(info.result.as_deref(), Some("vm-200"));
    assert!(info.error.is_none());
}

#[test]
fn test_task_info_deserialize_error_state() {
    let json = r#"{
        "task": "task-9",
        "state": "error",
        "error": "目标存储空间不足"
    }"#;

    let info: TaskInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.state, TaskState::Error);
    assert_eq!(info.error.as_deref(), Some("目标存储空间不足"));
}

#[test]
fn test_error_display() {
    let err = VimError::NotFound("数据中心 dc-9 不存在".to_string());
    assert!(err.to_string().contains("dc-9"));

    let err = VimError::Api(500, "internal error".to_string());
    assert!(err.to_string().contains("500"));

    let err = VimError::TaskFailed("克隆失败".to_string());
    assert!(err.to_string().contains("克隆失败"));
}
